//! Tool definitions and catalog
//!
//! Each task operation is describable as a named tool with a typed JSON
//! parameter schema, ready for a protocol layer to list. Nothing here
//! executes anything; the dispatcher owns execution.

use crate::intent::IntentAction;
use serde::Serialize;
use serde_json::{json, Value};

/// Unique tool identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolId {
    AddTask,
    ListTasks,
    CompleteTask,
    DeleteTask,
    UpdateTask,
}

impl ToolId {
    pub const ALL: [ToolId; 5] = [
        ToolId::AddTask,
        ToolId::ListTasks,
        ToolId::CompleteTask,
        ToolId::DeleteTask,
        ToolId::UpdateTask,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ToolId::AddTask => "add_task",
            ToolId::ListTasks => "list_tasks",
            ToolId::CompleteTask => "complete_task",
            ToolId::DeleteTask => "delete_task",
            ToolId::UpdateTask => "update_task",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ToolId::AddTask => "Add a new task to the todo list",
            ToolId::ListTasks => "List tasks with optional status filter",
            ToolId::CompleteTask => "Mark a task as complete",
            ToolId::DeleteTask => "Delete a task from the list",
            ToolId::UpdateTask => "Update task title or description",
        }
    }

    /// JSON schema for the tool's parameters
    ///
    /// `user_id` is required on every tool; `task_id` on every mutation
    /// of an existing task.
    pub fn input_schema(&self) -> Value {
        match self {
            ToolId::AddTask => json!({
                "type": "object",
                "properties": {
                    "user_id": {"type": "string", "description": "User ID"},
                    "title": {"type": "string", "description": "Task title"},
                    "description": {"type": "string", "description": "Task description"}
                },
                "required": ["user_id", "title"]
            }),
            ToolId::ListTasks => json!({
                "type": "object",
                "properties": {
                    "user_id": {"type": "string", "description": "User ID"},
                    "status": {
                        "type": "string",
                        "description": "Task status filter",
                        "enum": ["all", "pending", "completed"],
                        "default": "all"
                    }
                },
                "required": ["user_id"]
            }),
            ToolId::CompleteTask => json!({
                "type": "object",
                "properties": {
                    "user_id": {"type": "string", "description": "User ID"},
                    "task_id": {"type": "integer", "description": "Task ID to complete"}
                },
                "required": ["user_id", "task_id"]
            }),
            ToolId::DeleteTask => json!({
                "type": "object",
                "properties": {
                    "user_id": {"type": "string", "description": "User ID"},
                    "task_id": {"type": "integer", "description": "Task ID to delete"}
                },
                "required": ["user_id", "task_id"]
            }),
            ToolId::UpdateTask => json!({
                "type": "object",
                "properties": {
                    "user_id": {"type": "string", "description": "User ID"},
                    "task_id": {"type": "integer", "description": "Task ID to update"},
                    "title": {"type": "string", "description": "New task title"},
                    "description": {"type": "string", "description": "New task description"}
                },
                "required": ["user_id", "task_id"]
            }),
        }
    }

    /// The tool a classified action maps to, if any
    pub fn for_action(action: IntentAction) -> Option<ToolId> {
        match action {
            IntentAction::AddTask => Some(ToolId::AddTask),
            IntentAction::ListTasks => Some(ToolId::ListTasks),
            IntentAction::CompleteTask => Some(ToolId::CompleteTask),
            IntentAction::DeleteTask => Some(ToolId::DeleteTask),
            IntentAction::UpdateTask => Some(ToolId::UpdateTask),
            IntentAction::Unknown => None,
        }
    }
}

/// A tool declaration as a protocol layer would list it
#[derive(Debug, Clone, Serialize)]
pub struct ToolDecl {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Declarations for every task tool
pub fn declarations() -> Vec<ToolDecl> {
    ToolId::ALL
        .iter()
        .map(|tool| ToolDecl {
            name: tool.name(),
            description: tool.description(),
            input_schema: tool.input_schema(),
        })
        .collect()
}
