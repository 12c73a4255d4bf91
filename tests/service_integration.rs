//! Integration tests for the task service over both store backends

use errand::core::types::{StatusFilter, TaskId};
use errand::store::{JsonFileStore, MemoryStore, TaskStore};
use errand::task::{OutcomeStatus, ServiceOutcome, TaskService};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

fn service_over(store: Arc<dyn TaskStore>) -> TaskService {
    TaskService::new(store, Duration::from_secs(5))
}

fn temp_store_path() -> PathBuf {
    std::env::temp_dir().join(format!("errand-it-{}.json", uuid::Uuid::new_v4()))
}

/// Test 1: created ids are unique for the store's lifetime, even across
/// deletions, and listings include every creation
#[tokio::test]
async fn test_ids_are_never_reused() {
    let store = Arc::new(MemoryStore::new());
    let service = service_over(store.clone());

    let first = service.add("u1", "First", None).await;
    let second = service.add("u1", "Second", None).await;
    assert_ne!(first.task_id, second.task_id);

    service.delete("u1", second.task_id).await;
    let third = service.add("u1", "Third", None).await;
    assert_ne!(third.task_id, second.task_id);
    assert_ne!(third.task_id, first.task_id);

    match service.list("u1", StatusFilter::All).await {
        ServiceOutcome::Listing(listing) => {
            let ids: Vec<TaskId> = listing.tasks.iter().map(|t| t.id).collect();
            assert!(ids.contains(&first.task_id));
            assert!(ids.contains(&third.task_id));
        }
        ServiceOutcome::Task(result) => panic!("expected listing, got {:?}", result),
    }
}

/// Test 2: operations on a nonexistent id error out and change nothing
#[tokio::test]
async fn test_missing_id_leaves_store_unchanged() {
    let store = Arc::new(MemoryStore::new());
    let service = service_over(store.clone());
    service.add("u1", "Only task", None).await;

    let complete = service.complete("u1", TaskId(99)).await;
    let delete = service.delete("u1", TaskId(99)).await;
    let update = service.update("u1", TaskId(99), Some("New"), None).await;
    for outcome in [&complete, &delete, &update] {
        assert_eq!(outcome.status, OutcomeStatus::Error);
        assert_eq!(outcome.title, "Task with ID 99 not found");
    }

    let tasks = store.list_by_owner("u1", StatusFilter::All).await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "Only task");
    assert!(!tasks[0].completed);
}

/// Test 3: no field of a foreign task is mutated by denied operations
#[tokio::test]
async fn test_ownership_denial_mutates_nothing() {
    let store = Arc::new(MemoryStore::new());
    let service = service_over(store.clone());

    let theirs = service.add("u2", "Their task", Some("their notes")).await;
    let before = store.get_by_id(theirs.task_id).await.unwrap().unwrap();

    let complete = service.complete("u1", theirs.task_id).await;
    let update = service
        .update("u1", theirs.task_id, Some("Mine now"), Some("mine"))
        .await;
    let delete = service.delete("u1", theirs.task_id).await;
    for outcome in [&complete, &update, &delete] {
        assert_eq!(outcome.status, OutcomeStatus::Error);
    }

    let after = store.get_by_id(theirs.task_id).await.unwrap().unwrap();
    assert_eq!(after.owner_id, before.owner_id);
    assert_eq!(after.title, before.title);
    assert_eq!(after.description, before.description);
    assert_eq!(after.completed, before.completed);
    assert_eq!(after.updated_at, before.updated_at);
}

/// Test 4: listings come back newest first and respect the filter
#[tokio::test]
async fn test_listing_order_and_filters() {
    let store = Arc::new(MemoryStore::new());
    let service = service_over(store);

    let a = service.add("u1", "Oldest", None).await;
    service.add("u1", "Middle", None).await;
    service.add("u1", "Newest", None).await;
    service.complete("u1", a.task_id).await;

    match service.list("u1", StatusFilter::All).await {
        ServiceOutcome::Listing(listing) => {
            assert_eq!(listing.count, 3);
            assert_eq!(listing.tasks[0].title, "Newest");
            assert_eq!(listing.tasks[2].title, "Oldest");
        }
        ServiceOutcome::Task(result) => panic!("expected listing, got {:?}", result),
    }

    match service.list("u1", StatusFilter::Completed).await {
        ServiceOutcome::Listing(listing) => {
            assert_eq!(listing.count, 1);
            assert_eq!(listing.tasks[0].title, "Oldest");
        }
        ServiceOutcome::Task(result) => panic!("expected listing, got {:?}", result),
    }
}

/// Test 5: the file-backed store honors the same service contract and
/// keeps ownership checks across a reopen
#[tokio::test]
async fn test_file_store_contract() {
    let path = temp_store_path();

    {
        let store = Arc::new(JsonFileStore::open(&path).unwrap());
        let service = service_over(store);
        let created = service.add("u2", "Durable task", None).await;
        assert_eq!(created.status, OutcomeStatus::Created);
    }

    let store = Arc::new(JsonFileStore::open(&path).unwrap());
    let service = service_over(store.clone());

    // Still owned by u2 after reopen
    let denied = service.delete("u1", TaskId(1)).await;
    assert_eq!(denied.status, OutcomeStatus::Error);
    assert_eq!(denied.title, "Task 1 does not belong to user u1");

    let allowed = service.delete("u2", TaskId(1)).await;
    assert_eq!(allowed.status, OutcomeStatus::Deleted);
    assert_eq!(allowed.title, "Durable task");

    std::fs::remove_file(&path).ok();
}

/// Test 6: an empty listing is a valid result, not an error
#[tokio::test]
async fn test_empty_listing_is_not_an_error() {
    let store = Arc::new(MemoryStore::new());
    let service = service_over(store);

    match service.list("nobody", StatusFilter::All).await {
        ServiceOutcome::Listing(listing) => {
            assert_eq!(listing.count, 0);
            assert!(listing.tasks.is_empty());
        }
        ServiceOutcome::Task(result) => panic!("expected listing, got {:?}", result),
    }
}
