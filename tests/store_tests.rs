//! Integration tests for the history store backends.
//!
//! Durability and isolation are checked across store instances, the way a
//! restart or a second process would observe the data.

use mnemo::{FileHistoryStore, HistoryStore, Message, SqliteHistoryStore};
use tempfile::TempDir;

#[tokio::test]
async fn file_append_survives_a_new_store_instance() {
    let dir = TempDir::new().unwrap();

    {
        let store = FileHistoryStore::new(dir.path()).unwrap();
        store
            .append("u1", &Message::user("remember me"))
            .await
            .unwrap();
        store
            .append("u1", &Message::assistant("noted"))
            .await
            .unwrap();
    }

    let store = FileHistoryStore::new(dir.path()).unwrap();
    let loaded = store.load("u1").await.unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0].content, "remember me");
    assert_eq!(loaded[1].content, "noted");
}

#[tokio::test]
async fn sqlite_append_survives_a_new_store_instance() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mnemo.db");
    let path = path.to_str().unwrap();

    {
        let store = SqliteHistoryStore::new_local(path).await.unwrap();
        store
            .append("u1", &Message::user("remember me"))
            .await
            .unwrap();
    }

    let store = SqliteHistoryStore::new_local(path).await.unwrap();
    let loaded = store.load("u1").await.unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].content, "remember me");
}

#[tokio::test]
async fn file_sessions_never_leak_across_ids() {
    let dir = TempDir::new().unwrap();
    let store = FileHistoryStore::new(dir.path()).unwrap();

    store.append("a", &Message::user("for a")).await.unwrap();

    assert!(store.load("b").await.unwrap().is_empty());
    let a = store.load("a").await.unwrap();
    assert_eq!(a.len(), 1);
    assert_eq!(a[0].content, "for a");
}

#[tokio::test]
async fn sqlite_sessions_never_leak_across_ids() {
    let store = SqliteHistoryStore::new_memory().await.unwrap();

    store.append("a", &Message::user("for a")).await.unwrap();

    assert!(store.load("b").await.unwrap().is_empty());
    assert_eq!(store.load("a").await.unwrap().len(), 1);
}

#[tokio::test]
async fn path_hostile_session_id_stays_inside_the_store_dir() {
    let dir = TempDir::new().unwrap();
    let store = FileHistoryStore::new(dir.path()).unwrap();

    store
        .append("../../etc/passwd", &Message::user("contained"))
        .await
        .unwrap();

    let loaded = store.load("../../etc/passwd").await.unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].content, "contained");

    // Exactly one file, and it lives inside the store directory.
    let entries: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].starts_with(dir.path()));
}

#[tokio::test]
async fn file_sessions_listing_and_clear() {
    let dir = TempDir::new().unwrap();
    let store = FileHistoryStore::new(dir.path()).unwrap();

    store.append("a", &Message::user("1")).await.unwrap();
    store.append("a", &Message::assistant("2")).await.unwrap();
    store.append("b", &Message::user("3")).await.unwrap();

    let sessions = store.sessions().await.unwrap();
    assert_eq!(sessions.len(), 2);
    assert_eq!(sessions[0].id, "a");
    assert_eq!(sessions[0].message_count, 2);
    assert_eq!(sessions[1].id, "b");
    assert_eq!(sessions[1].message_count, 1);

    store.clear("a").await.unwrap();
    let sessions = store.sessions().await.unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].id, "b");

    // Clearing a session that never existed is a no-op.
    store.clear("ghost").await.unwrap();
}
