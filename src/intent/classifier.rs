//! Rule-based intent classification
//!
//! A message is matched against an ordered table of keyword rules; the
//! first rule that triggers interprets the message into an action,
//! extracted parameters, a fixed confidence, and a canned reply. The
//! classifier is a pure function of its input and never fails.

use crate::core::types::{StatusFilter, TaskId};
use crate::intent::extract::{derive_title, extract_task_id, extract_title};
use serde::{Deserialize, Serialize};

/// The action a message was classified as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentAction {
    AddTask,
    ListTasks,
    CompleteTask,
    DeleteTask,
    UpdateTask,
    Unknown,
}

impl IntentAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntentAction::AddTask => "add_task",
            IntentAction::ListTasks => "list_tasks",
            IntentAction::CompleteTask => "complete_task",
            IntentAction::DeleteTask => "delete_task",
            IntentAction::UpdateTask => "update_task",
            IntentAction::Unknown => "unknown",
        }
    }
}

/// Parameters extracted from a message; unused fields stay absent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntentParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<TaskId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_filter: Option<StatusFilter>,
}

/// Result of classifying one message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub action: IntentAction,
    pub params: IntentParams,
    /// Certainty in [0,1]; a dispatch gate, never persisted
    pub confidence: f32,
    /// Canned reply associated with the matched rule
    pub reply: String,
}

/// One entry of the classification table
struct Rule {
    /// Any of these substrings (in the lowercased message) triggers the rule
    keywords: &'static [&'static str],
    /// Interprets (raw message, lowercased message) into a classification
    interpret: fn(&str, &str) -> Classification,
}

/// The classification table. Order is the tie-break: the first rule whose
/// keywords match wins, so a message like "add and delete task 3" is an add.
const RULES: &[Rule] = &[
    Rule {
        keywords: &["add", "create", "new task", "make task", "insert"],
        interpret: interpret_add,
    },
    Rule {
        keywords: &["show", "list", "view", "see", "what tasks", "get tasks"],
        interpret: interpret_list,
    },
    Rule {
        keywords: &["complete", "finish", "mark as done", "check off", "done task"],
        interpret: interpret_complete,
    },
    Rule {
        keywords: &["delete", "remove", "clear task", "erase"],
        interpret: interpret_delete,
    },
    Rule {
        keywords: &["update", "change", "modify", "edit"],
        interpret: interpret_update,
    },
    Rule {
        keywords: &["hello", "hi", "hey", "greetings"],
        interpret: interpret_greeting,
    },
    Rule {
        keywords: &["help", "what can you do", "how to use"],
        interpret: interpret_help,
    },
];

/// Classify a message into an intent.
///
/// Case-insensitive, no I/O, total: every input produces a classification,
/// falling back to `unknown` with generic help text.
pub fn classify(message: &str) -> Classification {
    let lower = message.to_lowercase();
    for rule in RULES {
        if rule.keywords.iter().any(|k| lower.contains(k)) {
            let classification = (rule.interpret)(message, &lower);
            tracing::debug!(
                action = classification.action.as_str(),
                confidence = classification.confidence,
                "classified message"
            );
            return classification;
        }
    }
    Classification {
        action: IntentAction::Unknown,
        params: IntentParams::default(),
        confidence: 0.1,
        reply: "I can help you manage tasks. Try saying: 'Add task to buy groceries' \
                or 'Show my pending tasks'"
            .to_string(),
    }
}

fn interpret_add(message: &str, _lower: &str) -> Classification {
    let title = derive_title(message);
    Classification {
        reply: format!("Added '{}' to your tasks.", title),
        params: IntentParams {
            title: Some(title),
            // The raw message doubles as the task description
            description: Some(message.to_string()),
            ..IntentParams::default()
        },
        action: IntentAction::AddTask,
        confidence: 0.95,
    }
}

fn interpret_list(_message: &str, lower: &str) -> Classification {
    let filter = StatusFilter::from_message(lower);
    Classification {
        action: IntentAction::ListTasks,
        params: IntentParams {
            status_filter: Some(filter),
            ..IntentParams::default()
        },
        confidence: 0.9,
        reply: format!("Showing your {} tasks.", filter),
    }
}

fn interpret_complete(message: &str, _lower: &str) -> Classification {
    let task_id = extract_task_id(message);
    Classification {
        action: IntentAction::CompleteTask,
        confidence: if task_id.is_some() { 0.85 } else { 0.6 },
        reply: match task_id {
            Some(id) => format!("Marked task {} as complete!", id),
            None => "Please specify a task number to complete.".to_string(),
        },
        params: IntentParams {
            task_id,
            ..IntentParams::default()
        },
    }
}

fn interpret_delete(message: &str, _lower: &str) -> Classification {
    let task_id = extract_task_id(message);
    Classification {
        action: IntentAction::DeleteTask,
        confidence: if task_id.is_some() { 0.85 } else { 0.6 },
        reply: match task_id {
            Some(id) => format!("Deleted task {}.", id),
            None => "Which task should I delete?".to_string(),
        },
        params: IntentParams {
            task_id,
            ..IntentParams::default()
        },
    }
}

fn interpret_update(message: &str, lower: &str) -> Classification {
    let task_id = extract_task_id(message);
    // Title only when a phrase pattern genuinely matched; the fallback
    // derivation would echo chat text as a title
    let title = extract_title(lower);
    Classification {
        action: IntentAction::UpdateTask,
        confidence: if task_id.is_some() { 0.8 } else { 0.5 },
        reply: match task_id {
            Some(id) => format!("Updating task {}.", id),
            None => "Which task should I update?".to_string(),
        },
        params: IntentParams {
            title,
            task_id,
            ..IntentParams::default()
        },
    }
}

fn interpret_greeting(_message: &str, _lower: &str) -> Classification {
    Classification {
        action: IntentAction::Unknown,
        params: IntentParams::default(),
        confidence: 0.1,
        reply: "Hello! I'm your task assistant. I can help you add, list, complete, \
                or delete tasks."
            .to_string(),
    }
}

fn interpret_help(_message: &str, _lower: &str) -> Classification {
    Classification {
        action: IntentAction::Unknown,
        params: IntentParams::default(),
        confidence: 0.1,
        reply: "I can help you: 1) Add tasks 2) List tasks 3) Complete tasks \
                4) Delete tasks. Try: 'Add task to buy milk' or 'Show my tasks'"
            .to_string(),
    }
}
