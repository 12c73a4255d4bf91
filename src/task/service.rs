//! Task CRUD operations with structured outcomes
//!
//! Every operation is scoped to the acting user and converts any failure
//! (missing task, ownership mismatch, store error, timeout) into an error
//! outcome. Nothing at this layer panics or propagates; the dispatcher
//! above can always render whatever comes back.

use crate::core::error::{ErrandError, Result};
use crate::core::types::{StatusFilter, TaskId};
use crate::store::{NewTask, Task, TaskPatch, TaskStore};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Terminal or error status of a task operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Created,
    Completed,
    Deleted,
    Updated,
    Error,
}

impl OutcomeStatus {
    /// True for statuses that confirm a successful mutation
    pub fn is_terminal(&self) -> bool {
        !matches!(self, OutcomeStatus::Error)
    }
}

/// Structured outcome of a single task operation
///
/// On success `title` names the affected task; on error it carries a
/// descriptive sentence instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskOutcome {
    pub task_id: TaskId,
    pub status: OutcomeStatus,
    pub title: String,
}

impl TaskOutcome {
    fn error(task_id: TaskId, title: String) -> Self {
        Self {
            task_id,
            status: OutcomeStatus::Error,
            title,
        }
    }
}

/// One task as presented in a listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDetail {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Task> for TaskDetail {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            completed: task.completed,
            created_at: task.created_at,
        }
    }
}

/// A filtered listing; empty is a valid result, not an error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskListing {
    pub tasks: Vec<TaskDetail>,
    pub count: usize,
}

/// Either kind of operation result, serialized flat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServiceOutcome {
    Task(TaskOutcome),
    Listing(TaskListing),
}

impl ServiceOutcome {
    /// The mutation outcome, if this was one
    pub fn as_task(&self) -> Option<&TaskOutcome> {
        match self {
            ServiceOutcome::Task(outcome) => Some(outcome),
            ServiceOutcome::Listing(_) => None,
        }
    }
}

/// Per-user task operations over a [`TaskStore`]
#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn TaskStore>,
    timeout: Duration,
}

impl TaskService {
    pub fn new(store: Arc<dyn TaskStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    /// Create a task owned by `user_id`
    pub async fn add(&self, user_id: &str, title: &str, description: Option<&str>) -> TaskOutcome {
        let title = title.trim();
        if title.is_empty() {
            return self.failure(
                user_id,
                TaskId::NONE,
                "create",
                ErrandError::InvalidTitle("must not be empty".into()),
            );
        }

        let new = NewTask {
            owner_id: user_id.to_string(),
            title: title.to_string(),
            description: description.map(str::to_string),
        };
        match self.bounded("insert", self.store.insert(new)).await {
            Ok(task) => TaskOutcome {
                task_id: task.id,
                status: OutcomeStatus::Created,
                title: task.title,
            },
            Err(e) => {
                tracing::warn!(user = user_id, error = %e, "task creation failed");
                TaskOutcome::error(TaskId::NONE, format!("Failed to create task: {}", e))
            }
        }
    }

    /// All of `user_id`'s tasks under the given filter, newest first
    pub async fn list(&self, user_id: &str, filter: StatusFilter) -> ServiceOutcome {
        match self
            .bounded("list", self.store.list_by_owner(user_id, filter))
            .await
        {
            Ok(tasks) => {
                let tasks: Vec<TaskDetail> = tasks.into_iter().map(TaskDetail::from).collect();
                let count = tasks.len();
                ServiceOutcome::Listing(TaskListing { tasks, count })
            }
            Err(e) => {
                tracing::warn!(user = user_id, error = %e, "task listing failed");
                ServiceOutcome::Task(TaskOutcome::error(
                    TaskId::NONE,
                    format!("Failed to list tasks: {}", e),
                ))
            }
        }
    }

    /// Mark one of `user_id`'s tasks as completed.
    ///
    /// Idempotent: completing an already-completed task succeeds again and
    /// only refreshes `updated_at`.
    pub async fn complete(&self, user_id: &str, task_id: TaskId) -> TaskOutcome {
        match self
            .bounded(
                "complete",
                self.store.update(user_id, task_id, TaskPatch::complete()),
            )
            .await
        {
            Ok(task) => TaskOutcome {
                task_id: task.id,
                status: OutcomeStatus::Completed,
                title: task.title,
            },
            Err(e) => self.failure(user_id, task_id, "complete", e),
        }
    }

    /// Permanently remove one of `user_id`'s tasks, echoing its title
    pub async fn delete(&self, user_id: &str, task_id: TaskId) -> TaskOutcome {
        match self
            .bounded("delete", self.store.delete(user_id, task_id))
            .await
        {
            Ok(task) => TaskOutcome {
                task_id,
                status: OutcomeStatus::Deleted,
                title: task.title,
            },
            Err(e) => self.failure(user_id, task_id, "delete", e),
        }
    }

    /// Change title and/or description of one of `user_id`'s tasks;
    /// absent fields are left untouched
    pub async fn update(
        &self,
        user_id: &str,
        task_id: TaskId,
        title: Option<&str>,
        description: Option<&str>,
    ) -> TaskOutcome {
        let patch = TaskPatch {
            title: title.map(str::to_string),
            description: description.map(str::to_string),
            completed: None,
        };
        match self
            .bounded("update", self.store.update(user_id, task_id, patch))
            .await
        {
            Ok(task) => TaskOutcome {
                task_id: task.id,
                status: OutcomeStatus::Updated,
                title: task.title,
            },
            Err(e) => self.failure(user_id, task_id, "update", e),
        }
    }

    /// Bound a store call so a stalled backend cannot hang the dispatch path
    async fn bounded<T>(
        &self,
        op: &'static str,
        fut: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(ErrandError::Timeout(op)),
        }
    }

    fn failure(
        &self,
        user_id: &str,
        task_id: TaskId,
        op: &'static str,
        err: ErrandError,
    ) -> TaskOutcome {
        tracing::warn!(user = user_id, task_id = task_id.0, error = %err, "task operation failed");
        let title = match &err {
            // These already read as complete sentences naming the id
            ErrandError::TaskNotFound(_) | ErrandError::NotOwner { .. } => err.to_string(),
            other => format!("Failed to {} task: {}", op, other),
        };
        TaskOutcome::error(task_id, title)
    }
}
