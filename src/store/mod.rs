//! Task persistence boundary
//!
//! The rest of the crate talks to storage through the [`TaskStore`] trait.
//! Implementations must treat each trait method as one transactional unit:
//! the existence/ownership check and the mutation happen inside a single
//! critical section, so a concurrent request can never slip between them.

pub mod file;
pub mod memory;

use crate::core::error::{ErrandError, Result};
use crate::core::types::{StatusFilter, TaskId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// A task record, owned by exactly one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    /// Owning user; immutable after creation
    pub owner_id: String,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    /// Set once at insertion; immutable
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation
    pub updated_at: DateTime<Utc>,
}

/// Insertion request; the store assigns id and timestamps
#[derive(Debug, Clone)]
pub struct NewTask {
    pub owner_id: String,
    pub title: String,
    pub description: Option<String>,
}

/// Partial update; `None` leaves the field untouched
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

impl TaskPatch {
    /// Patch that marks a task as completed
    pub fn complete() -> Self {
        Self {
            completed: Some(true),
            ..Self::default()
        }
    }
}

/// Ownership guard applied before every mutation.
///
/// Store implementations call this inside their critical section so the
/// check and the write form one atomic step. The error reveals only the
/// mismatch, never the other owner.
pub fn authorize(task: &Task, user_id: &str) -> Result<()> {
    if task.owner_id != user_id {
        return Err(ErrandError::NotOwner {
            task_id: task.id,
            user_id: user_id.to_string(),
        });
    }
    Ok(())
}

/// Persistence interface for task records.
///
/// `update` and `delete` take the acting user and run the ownership guard
/// themselves; `get_by_id` is owner-agnostic and intended for read paths
/// that perform their own checks (and for tests verifying non-mutation).
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Insert a new task, assigning its id and timestamps
    async fn insert(&self, new: NewTask) -> Result<Task>;

    /// Fetch a task by id, `None` when absent
    async fn get_by_id(&self, id: TaskId) -> Result<Option<Task>>;

    /// All tasks owned by `owner_id` matching the filter, most recently
    /// created first
    async fn list_by_owner(&self, owner_id: &str, filter: StatusFilter) -> Result<Vec<Task>>;

    /// Apply a patch to a task owned by `user_id`, refreshing `updated_at`
    ///
    /// Fails with `TaskNotFound` / `NotOwner` without touching the record.
    async fn update(&self, user_id: &str, id: TaskId, patch: TaskPatch) -> Result<Task>;

    /// Permanently remove a task owned by `user_id`, returning the removed
    /// record
    async fn delete(&self, user_id: &str, id: TaskId) -> Result<Task>;
}

/// Shared filter predicate for listings
fn matches_filter(task: &Task, filter: StatusFilter) -> bool {
    match filter {
        StatusFilter::All => true,
        StatusFilter::Pending => !task.completed,
        StatusFilter::Completed => task.completed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_task(owner: &str) -> Task {
        let now = Utc::now();
        Task {
            id: TaskId(1),
            owner_id: owner.to_string(),
            title: "Buy milk".to_string(),
            description: None,
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_authorize_owner_passes() {
        let task = sample_task("u1");
        assert!(authorize(&task, "u1").is_ok());
    }

    #[test]
    fn test_authorize_mismatch_names_only_the_caller() {
        let task = sample_task("u2");
        let err = authorize(&task, "u1").unwrap_err();
        let message = err.to_string();
        assert_eq!(message, "Task 1 does not belong to user u1");
        // The actual owner must not leak through the error
        assert!(!message.contains("u2"));
    }

    #[test]
    fn test_matches_filter() {
        let mut task = sample_task("u1");
        assert!(matches_filter(&task, StatusFilter::All));
        assert!(matches_filter(&task, StatusFilter::Pending));
        assert!(!matches_filter(&task, StatusFilter::Completed));
        task.completed = true;
        assert!(matches_filter(&task, StatusFilter::All));
        assert!(!matches_filter(&task, StatusFilter::Pending));
        assert!(matches_filter(&task, StatusFilter::Completed));
    }
}
