//! Integration tests for the on-disk credential store.

use std::sync::Arc;

use passkeeper_core::{CredentialStore, RegisterOutcome, SqliteUserStorage, UserStorage};
use tempfile::TempDir;

#[tokio::test]
async fn records_survive_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("passkeeper.db");

    {
        let store = CredentialStore::open(&db_path).await.unwrap();
        assert_eq!(
            store.register("bob", "hunter2").await.unwrap(),
            RegisterOutcome::Created
        );
        store.close().await;
    }

    {
        let store = CredentialStore::open(&db_path).await.unwrap();
        assert!(store.authenticate("bob", "hunter2").await.unwrap());
        assert!(!store.authenticate("bob", "other").await.unwrap());
        assert_eq!(
            store.register("bob", "other").await.unwrap(),
            RegisterOutcome::DuplicateUsername
        );
        assert_eq!(store.location(), Some(db_path.as_path()));
        assert_eq!(store.backend_name(), "SQLite");
        store.close().await;
    }
}

#[tokio::test]
async fn repeated_open_keeps_existing_records() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("passkeeper.db");

    let store = CredentialStore::open(&db_path).await.unwrap();
    store.register("alice", "wonderland").await.unwrap();
    store.register("bob", "hunter2").await.unwrap();
    store.close().await;

    for _ in 0..3 {
        let store = CredentialStore::open(&db_path).await.unwrap();
        assert_eq!(store.user_count().await.unwrap(), 2);
        assert!(store.authenticate("alice", "wonderland").await.unwrap());
        store.close().await;
    }
}

#[tokio::test]
async fn records_committed_without_explicit_close() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("passkeeper.db");

    {
        let store = CredentialStore::open(&db_path).await.unwrap();
        store.register("bob", "hunter2").await.unwrap();
    }

    let store = CredentialStore::open(&db_path).await.unwrap();
    assert!(store.is_registered("bob").await.unwrap());
    assert!(store.authenticate("bob", "hunter2").await.unwrap());
}

#[tokio::test]
async fn store_over_existing_backend() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("shared.db");

    let storage = Arc::new(SqliteUserStorage::open(&db_path).await.unwrap());
    let store = CredentialStore::with_storage(storage.clone()).await.unwrap();

    store.register("carol", "secret").await.unwrap();

    assert!(storage.credentials_match("carol", "secret").await.unwrap());
    assert_eq!(storage.count().await.unwrap(), 1);
    assert!(store.location().is_none());
}

#[tokio::test]
async fn separate_in_memory_stores_are_isolated() {
    let first = CredentialStore::in_memory().await.unwrap();
    let second = CredentialStore::in_memory().await.unwrap();

    first.register("bob", "hunter2").await.unwrap();

    assert!(first.authenticate("bob", "hunter2").await.unwrap());
    assert!(!second.authenticate("bob", "hunter2").await.unwrap());
    assert_eq!(second.user_count().await.unwrap(), 0);
}

#[tokio::test]
async fn unreadable_location_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    // A directory cannot be opened as a database file
    let result = CredentialStore::open(temp_dir.path()).await;

    assert!(result.is_err());
}
