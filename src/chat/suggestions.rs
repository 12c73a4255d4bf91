//! Suggested follow-up actions per dispatched intent

use crate::intent::IntentAction;

/// Fixed suggestion table keyed by action name
const SUGGESTIONS: &[(&str, &[&str])] = &[
    (
        "add_task",
        &["List all tasks", "See pending tasks", "Add another task"],
    ),
    (
        "list_tasks",
        &["Add a new task", "Mark a task complete", "See completed tasks"],
    ),
    (
        "complete_task",
        &["List pending tasks", "Add another task", "Delete a task"],
    ),
    (
        "delete_task",
        &["Add a new task", "List all tasks", "See what's pending"],
    ),
    ("unknown", &["Add a task", "List tasks", "Mark task complete"]),
];

/// Generic menu for actions without a table entry
const DEFAULT_SUGGESTIONS: &[&str] = &["Add task", "List tasks", "Complete task", "Delete task"];

/// Look up the follow-up suggestions for an action, deduplicated in order
pub fn suggestions_for(action: IntentAction) -> Vec<String> {
    let entries = SUGGESTIONS
        .iter()
        .find(|(name, _)| *name == action.as_str())
        .map(|(_, list)| *list)
        .unwrap_or(DEFAULT_SUGGESTIONS);

    let mut seen = Vec::with_capacity(entries.len());
    for entry in entries {
        if !seen.iter().any(|s: &String| s == entry) {
            seen.push((*entry).to_string());
        }
    }
    seen
}
