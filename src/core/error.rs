use crate::core::types::TaskId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ErrandError {
    #[error("Task with ID {0} not found")]
    TaskNotFound(TaskId),

    #[error("Task {task_id} does not belong to user {user_id}")]
    NotOwner { task_id: TaskId, user_id: String },

    #[error("Invalid title: {0}")]
    InvalidTitle(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Store operation timed out: {0}")]
    Timeout(&'static str),

    #[error("LLM error: {0}")]
    LlmError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ErrandError>;
