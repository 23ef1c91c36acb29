use super::*;
use tempfile::TempDir;

async fn open() -> (TempDir, LocalStore) {
    let dir = TempDir::new().unwrap();
    let store = LocalStore::open(dir.path()).await.unwrap();
    (dir, store)
}

#[tokio::test]
async fn test_open_missing_file_is_empty() {
    let (_dir, store) = open().await;
    let value: Option<String> = store.get("anything").await.unwrap();
    assert!(value.is_none());
    assert!(!store.path().exists());
}

#[tokio::test]
async fn test_set_get_persists() {
    let dir = TempDir::new().unwrap();
    {
        let store = LocalStore::open(dir.path()).await.unwrap();
        store
            .set(keys::LAST_SELECTION, &LastSelection::new("hello"))
            .await
            .unwrap();
    }

    let reopened = LocalStore::open(dir.path()).await.unwrap();
    let selection: LastSelection = reopened.get(keys::LAST_SELECTION).await.unwrap().unwrap();
    assert_eq!(selection.text, "hello");
}

#[tokio::test]
async fn test_remove() {
    let (_dir, store) = open().await;
    store.set("k", &1).await.unwrap();
    assert!(store.remove("k").await.unwrap());
    assert!(!store.remove("k").await.unwrap());
    assert!(store.get::<i32>("k").await.unwrap().is_none());
}

#[tokio::test]
async fn test_take_consumes() {
    let (_dir, store) = open().await;
    store
        .set(keys::LAST_SELECTION, &LastSelection::new("once"))
        .await
        .unwrap();

    let first: Option<LastSelection> = store.take(keys::LAST_SELECTION).await.unwrap();
    assert_eq!(first.unwrap().text, "once");
    let second: Option<LastSelection> = store.take(keys::LAST_SELECTION).await.unwrap();
    assert!(second.is_none());
}

#[tokio::test]
async fn test_open_rejects_non_object() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("store.json"), "[1, 2]").unwrap();
    let result = LocalStore::open(dir.path()).await;
    assert!(matches!(result, Err(StorageError::Corrupt { .. })));
}

#[tokio::test]
async fn test_record_summary_caps_history() {
    let (_dir, store) = open().await;
    for i in 1..=11 {
        store
            .record_summary(HistoryEntry::new(format!("t{}", i), format!("s{}", i)), 10)
            .await
            .unwrap();
    }

    let history = store.history(10).await.unwrap();
    assert_eq!(history.len(), 10);
    assert_eq!(history.latest().unwrap().summary, "s11");
    assert!(history.iter().all(|e| e.summary != "s1"));

    let last: HistoryEntry = store.get(keys::LAST_SUMMARY).await.unwrap().unwrap();
    assert_eq!(last.summary, "s11");
}

#[tokio::test]
async fn test_clear_history() {
    let (_dir, store) = open().await;
    store
        .record_summary(HistoryEntry::new("t", "s"), 10)
        .await
        .unwrap();
    store.clear_history().await.unwrap();

    assert!(store.history(10).await.unwrap().is_empty());
    assert!(store.get::<HistoryEntry>(keys::LAST_SUMMARY).await.unwrap().is_none());
}

#[tokio::test]
async fn test_unreadable_history_is_discarded() {
    let (_dir, store) = open().await;
    store.set(keys::SUMMARY_HISTORY, &"not a list").await.unwrap();
    let history = store.history(10).await.unwrap();
    assert!(history.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_record_summary_keeps_every_entry() {
    let (_dir, store) = open().await;
    let store = std::sync::Arc::new(store);

    let tasks: Vec<_> = (0..8)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .record_summary(HistoryEntry::new(format!("text {}", i), "s"), 10)
                    .await
                    .unwrap();
            })
        })
        .collect();
    for task in tasks {
        task.await.unwrap();
    }

    let history = store.history(10).await.unwrap();
    assert_eq!(history.len(), 8);
    let mut texts: Vec<_> = history.iter().map(|e| e.original_text.clone()).collect();
    texts.sort();
    texts.dedup();
    assert_eq!(texts.len(), 8);

    let reopened = LocalStore::open(store.path().parent().unwrap()).await.unwrap();
    assert_eq!(reopened.history(10).await.unwrap().len(), 8);
}
