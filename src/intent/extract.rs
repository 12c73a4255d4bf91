//! Parameter extraction from free-form messages
//!
//! The phrase patterns and the digit-run scan live here as explicit,
//! ordered tables so the tie-break order is structural rather than an
//! accident of code placement.

use crate::core::types::TaskId;

/// Phrase patterns tried in order for title extraction.
///
/// Each pattern may match anywhere in the lowercased message; the capture
/// is everything after it. The first pattern whose trimmed capture is
/// longer than three characters wins.
const TITLE_PATTERNS: &[&str] = &[
    "add task to ",
    "add task: ",
    "task to ",
    "buy ",
    "complete ",
    "finish ",
];

/// Filler words stripped from the message on the fallback title path
const FILLER_WORDS: &[&str] = &["add", "task", "to"];

/// Longest title produced by the fallback path
const FALLBACK_TITLE_MAX: usize = 50;

/// Captures accepted only when strictly longer than this many characters
const MIN_TITLE_CHARS: usize = 3;

/// Extract a title using the phrase-pattern table only.
///
/// Expects the lowercased message. Returns `None` when no pattern yields
/// an acceptable capture; callers that need a title no matter what go
/// through [`derive_title`].
pub fn extract_title(lower: &str) -> Option<String> {
    for pattern in TITLE_PATTERNS {
        if let Some(pos) = lower.find(pattern) {
            let candidate = lower[pos + pattern.len()..].trim();
            if candidate.chars().count() > MIN_TITLE_CHARS {
                return Some(capitalize(candidate));
            }
        }
    }
    None
}

/// Derive a title for task creation: phrase patterns first, then the
/// filler-word-stripping fallback, then the literal `"New Task"`.
pub fn derive_title(message: &str) -> String {
    let lower = message.to_lowercase();
    if let Some(title) = extract_title(&lower) {
        return title;
    }

    let mut stripped = message.to_string();
    for word in FILLER_WORDS {
        stripped = remove_ignore_case(&stripped, word);
    }
    let stripped = stripped.trim();
    if stripped.chars().count() > MIN_TITLE_CHARS {
        return stripped.chars().take(FALLBACK_TITLE_MAX).collect();
    }

    "New Task".to_string()
}

/// Extract the first maximal digit run as a task id.
///
/// Absence, or a run too large for u64, yields `None` - never zero and
/// never a panic.
pub fn extract_task_id(message: &str) -> Option<TaskId> {
    let mut digits = String::new();
    for ch in message.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
        } else if !digits.is_empty() {
            break;
        }
    }
    if digits.is_empty() {
        return None;
    }
    // Real ids start at 1; a literal zero run counts as no id at all
    digits.parse::<u64>().ok().filter(|&n| n != 0).map(TaskId)
}

/// Uppercase the first character (input is already lowercased)
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Remove every occurrence of `needle` from `text`, ASCII-case-insensitive
fn remove_ignore_case(text: &str, needle: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let needle_chars: Vec<char> = needle.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        let hit = i + needle_chars.len() <= chars.len()
            && chars[i..i + needle_chars.len()]
                .iter()
                .zip(&needle_chars)
                .all(|(a, b)| a.to_ascii_lowercase() == *b);
        if hit {
            i += needle_chars.len();
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_add_task_to() {
        assert_eq!(
            extract_title("add task to buy milk"),
            Some("Buy milk".to_string())
        );
    }

    #[test]
    fn test_pattern_add_task_colon() {
        assert_eq!(
            extract_title("add task: call the dentist"),
            Some("Call the dentist".to_string())
        );
    }

    #[test]
    fn test_pattern_order_is_fixed() {
        // "add task to " sits before "buy " in the table, so the longer
        // prefix wins even though both match
        assert_eq!(
            extract_title("add task to buy bread"),
            Some("Buy bread".to_string())
        );
    }

    #[test]
    fn test_short_capture_falls_through() {
        // "buy gum" captures "gum" (3 chars, not accepted); no later
        // pattern matches either
        assert_eq!(extract_title("buy gum"), None);
    }

    #[test]
    fn test_derive_title_fallback_strips_filler() {
        assert_eq!(derive_title("Add groceries to my list"), "groceries  my list");
    }

    #[test]
    fn test_derive_title_fallback_truncates() {
        let long = format!("add {}", "x".repeat(80));
        let title = derive_title(&long);
        assert_eq!(title.chars().count(), 50);
    }

    #[test]
    fn test_derive_title_default() {
        assert_eq!(derive_title("add"), "New Task");
        assert_eq!(derive_title("add to"), "New Task");
    }

    #[test]
    fn test_task_id_first_run_wins() {
        assert_eq!(extract_task_id("complete task 3"), Some(TaskId(3)));
        assert_eq!(extract_task_id("move 12 before 34"), Some(TaskId(12)));
    }

    #[test]
    fn test_task_id_absent() {
        assert_eq!(extract_task_id("complete the report"), None);
    }

    #[test]
    fn test_task_id_overflow_is_none() {
        // 21 digits exceeds u64; the rule promises null, never a panic
        assert_eq!(extract_task_id("task 111111111111111111111"), None);
    }

    #[test]
    fn test_task_id_never_zero() {
        assert_eq!(extract_task_id(""), None);
        assert_eq!(extract_task_id("zero tasks"), None);
        assert_eq!(extract_task_id("complete task 0"), None);
        assert_eq!(extract_task_id("task 00"), None);
    }
}
