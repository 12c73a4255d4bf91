//! JSON-file-backed task store
//!
//! The same single-lock layout as the memory store, with the full state
//! serialized to one JSON document after every mutation and reloaded on
//! open. Good enough as a durable document store for a single process;
//! anything multi-process belongs behind a real database.

use crate::core::error::{ErrandError, Result};
use crate::core::types::{StatusFilter, TaskId};
use crate::store::memory::StoreInner;
use crate::store::{NewTask, Task, TaskPatch, TaskStore};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// On-disk document shape
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    next_id: u64,
    tasks: Vec<Task>,
}

/// Task store persisted as a single JSON document
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: Mutex<StoreInner>,
}

impl JsonFileStore {
    /// Open a store at `path`, loading existing state if the file exists
    pub fn open(path: &Path) -> Result<Self> {
        let mut inner = StoreInner::default();
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let file: StoreFile = serde_json::from_str(&content)?;
            inner.next_id = file.next_id;
            for task in file.tasks {
                inner.tasks.insert(task.id, task);
            }
            tracing::info!(
                path = %path.display(),
                tasks = inner.tasks.len(),
                "loaded task store"
            );
        }
        Ok(Self {
            path: path.to_path_buf(),
            inner: Mutex::new(inner),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreInner>> {
        self.inner
            .lock()
            .map_err(|_| ErrandError::StoreUnavailable("task store mutex poisoned".into()))
    }

    fn persist(&self, inner: &StoreInner) -> Result<()> {
        let file = StoreFile {
            next_id: inner.next_id,
            tasks: inner.tasks.values().cloned().collect(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

#[async_trait]
impl TaskStore for JsonFileStore {
    async fn insert(&self, new: NewTask) -> Result<Task> {
        let mut inner = self.lock()?;
        let task = inner.insert(new);
        self.persist(&inner)?;
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
        let mut inner = self.lock()?;
        let task = inner.update(user_id, id, patch)?;
        self.persist(&inner)?;
        tracing::info!(task_id = task.id.0, "task updated");
        Ok(task)
    }

    async fn delete(&self, user_id: &str, id: TaskId) -> Result<Task> {
        let mut inner = self.lock()?;
        let task = inner.delete(user_id, id)?;
        self.persist(&inner)?;
        tracing::info!(task_id = task.id.0, "task deleted");
        Ok(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store_path() -> PathBuf {
        std::env::temp_dir().join(format!("errand-store-{}.json", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn test_state_survives_reopen() {
        let path = temp_store_path();

        {
            let store = JsonFileStore::open(&path).unwrap();
            store
                .insert(NewTask {
                    owner_id: "u1".to_string(),
                    title: "Persisted".to_string(),
                    description: Some("Across reopen".to_string()),
                })
                .await
                .unwrap();
        }

        let reopened = JsonFileStore::open(&path).unwrap();
        let tasks = reopened
            .list_by_owner("u1", StatusFilter::All)
            .await
            .unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Persisted");
        assert_eq!(tasks[0].description.as_deref(), Some("Across reopen"));

        // Id counter continues where it left off, no reuse after reopen
        let next = reopened
            .insert(NewTask {
                owner_id: "u1".to_string(),
                title: "Second".to_string(),
                description: None,
            })
            .await
            .unwrap();
        assert_eq!(next.id, TaskId(2));

        std::fs::remove_file(&path).ok();
    }

    #[tokio::test]
    async fn test_delete_is_durable() {
        let path = temp_store_path();

        {
            let store = JsonFileStore::open(&path).unwrap();
            let task = store
                .insert(NewTask {
                    owner_id: "u1".to_string(),
                    title: "Doomed".to_string(),
                    description: None,
                })
                .await
                .unwrap();
            store.delete("u1", task.id).await.unwrap();
        }

        let reopened = JsonFileStore::open(&path).unwrap();
        assert!(reopened.get_by_id(TaskId(1)).await.unwrap().is_none());

        std::fs::remove_file(&path).ok();
    }
}
