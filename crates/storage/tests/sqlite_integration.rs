use storage::repository::{KeyValueStore, Storage, StorageError};
use storage::sqlite::SqliteStore;

#[tokio::test]
async fn sqlite_roundtrip_persists_blobs() {
    let store = SqliteStore::connect("sqlite:file:memdb_kv_roundtrip?mode=memory&cache=shared")
        .await
        .expect("connect");
    store.migrate().await.expect("migrate");

    assert_eq!(store.get("mathTrainer.userStats").await.unwrap(), None);

    store
        .set("mathTrainer.userStats", r#"{"totalProblems":3}"#)
        .await
        .unwrap();
    let fetched = store.get("mathTrainer.userStats").await.unwrap();
    assert_eq!(fetched.as_deref(), Some(r#"{"totalProblems":3}"#));
}

#[tokio::test]
async fn sqlite_set_overwrites_existing_key() {
    let store = SqliteStore::connect("sqlite:file:memdb_kv_overwrite?mode=memory&cache=shared")
        .await
        .expect("connect");
    store.migrate().await.expect("migrate");

    store.set("k", "first").await.unwrap();
    store.set("k", "second").await.unwrap();
    assert_eq!(store.get("k").await.unwrap().as_deref(), Some("second"));
}

#[tokio::test]
async fn sqlite_remove_deletes_and_reports_missing() {
    let store = SqliteStore::connect("sqlite:file:memdb_kv_remove?mode=memory&cache=shared")
        .await
        .expect("connect");
    store.migrate().await.expect("migrate");

    store.set("k", "v").await.unwrap();
    store.remove("k").await.unwrap();
    assert_eq!(store.get("k").await.unwrap(), None);

    let err = store.remove("k").await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound));
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let store = SqliteStore::connect("sqlite:file:memdb_kv_migrate?mode=memory&cache=shared")
        .await
        .expect("connect");
    store.migrate().await.expect("first migrate");
    store.set("k", "kept").await.unwrap();
    store.migrate().await.expect("second migrate");
    assert_eq!(store.get("k").await.unwrap().as_deref(), Some("kept"));
}

#[tokio::test]
async fn storage_sqlite_builds_working_kv() {
    let storage = Storage::sqlite("sqlite:file:memdb_kv_storage?mode=memory&cache=shared")
        .await
        .expect("storage");
    storage.kv.set("a", "1").await.unwrap();
    assert_eq!(storage.kv.get("a").await.unwrap().as_deref(), Some("1"));
}

#[tokio::test]
async fn file_database_survives_reconnect() {
    let dir = std::env::temp_dir().join(format!("drill-kv-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("persist.sqlite3");
    let _ = std::fs::remove_file(&path);
    let url = format!("sqlite://{}?mode=rwc", path.display());

    {
        let storage = Storage::sqlite(&url).await.expect("first open");
        storage.kv.set("mathTrainer.sessionHistory", "[]").await.unwrap();
    }

    let storage = Storage::sqlite(&url).await.expect("reopen");
    assert_eq!(
        storage
            .kv
            .get("mathTrainer.sessionHistory")
            .await
            .unwrap()
            .as_deref(),
        Some("[]")
    );
    let _ = std::fs::remove_dir_all(&dir);
}
