//! In-memory task store
//!
//! One mutex guards the whole map, so every trait method is a single
//! critical section and check-then-mutate cannot interleave with another
//! request. Intended for tests and single-process use.

use crate::core::error::{ErrandError, Result};
use crate::core::types::{StatusFilter, TaskId};
use crate::store::{authorize, matches_filter, NewTask, Task, TaskPatch, TaskStore};
use ahash::AHashMap;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
pub(crate) struct StoreInner {
    pub(crate) tasks: AHashMap<TaskId, Task>,
    pub(crate) next_id: u64,
}

impl StoreInner {
    pub(crate) fn insert(&mut self, new: NewTask) -> Task {
        self.next_id += 1;
        let now = Utc::now();
        let task = Task {
            id: TaskId(self.next_id),
            owner_id: new.owner_id,
            title: new.title,
            description: new.description,
            completed: false,
            created_at: now,
            updated_at: now,
        };
        self.tasks.insert(task.id, task.clone());
        task
    }

    pub(crate) fn list_by_owner(&self, owner_id: &str, filter: StatusFilter) -> Vec<Task> {
        let mut tasks: Vec<Task> = self
            .tasks
            .values()
            .filter(|t| t.owner_id == owner_id && matches_filter(t, filter))
            .cloned()
            .collect();
        // Most recent first; id breaks ties between same-instant inserts
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        tasks
    }

    pub(crate) fn update(&mut self, user_id: &str, id: TaskId, patch: TaskPatch) -> Result<Task> {
        let task = self
            .tasks
            .get_mut(&id)
            .ok_or(ErrandError::TaskNotFound(id))?;
        authorize(task, user_id)?;
        if let Some(title) = patch.title {
            task.title = title;
        }
        if let Some(description) = patch.description {
            task.description = Some(description);
        }
        if let Some(completed) = patch.completed {
            task.completed = completed;
        }
        task.updated_at = Utc::now();
        Ok(task.clone())
    }

    pub(crate) fn delete(&mut self, user_id: &str, id: TaskId) -> Result<Task> {
        let task = self.tasks.get(&id).ok_or(ErrandError::TaskNotFound(id))?;
        authorize(task, user_id)?;
        self.tasks.remove(&id).ok_or(ErrandError::TaskNotFound(id))
    }
}

/// Task store backed by a process-local map
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<StoreInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreInner>> {
        self.inner
            .lock()
            .map_err(|_| ErrandError::StoreUnavailable("task store mutex poisoned".into()))
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn insert(&self, new: NewTask) -> Result<Task> {
        let mut inner = self.lock()?;
        let task = inner.insert(new);
        tracing::info!(task_id = task.id.0, owner = %task.owner_id, "task created");
        Ok(task)
    }

    async fn get_by_id(&self, id: TaskId) -> Result<Option<Task>> {
        Ok(self.lock()?.tasks.get(&id).cloned())
    }

    async fn list_by_owner(&self, owner_id: &str, filter: StatusFilter) -> Result<Vec<Task>> {
        Ok(self.lock()?.list_by_owner(owner_id, filter))
    }

    async fn update(&self, user_id: &str, id: TaskId, patch: TaskPatch) -> Result<Task> {
        let task = self.lock()?.update(user_id, id, patch)?;
        tracing::info!(task_id = task.id.0, "task updated");
        Ok(task)
    }

    async fn delete(&self, user_id: &str, id: TaskId) -> Result<Task> {
        let task = self.lock()?.delete(user_id, id)?;
        tracing::info!(task_id = task.id.0, "task deleted");
        Ok(task)
    }
}
