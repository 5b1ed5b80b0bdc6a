//! Integration tests for the in-memory record store contract.

use chrono::Utc;
use strand_core::{Error, PropertySchema, StringRecord, StringRecordRepo};
use strand_store::MemoryStore;

#[tokio::test]
async fn test_insert_conflict_and_order() -> anyhow::Result<()> {
    let schema = PropertySchema::standard();
    let store = MemoryStore::new();
    assert!(store.is_empty().await);

    for value in ["b", "a", "c"] {
        store
            .insert(&StringRecord::new(&schema, value, Utc::now()))
            .await?;
    }
    assert_eq!(store.len().await, 3);

    let again = store
        .insert(&StringRecord::new(&schema, "a", Utc::now()))
        .await;
    assert!(matches!(again, Err(Error::Conflict(v)) if v == "a"));

    store.delete("a").await?;
    let values: Vec<_> = store.list().await?.into_iter().map(|r| r.value).collect();
    assert_eq!(values, vec!["b", "c"]);
    Ok(())
}

#[tokio::test]
async fn test_concurrent_inserts_keep_one_record_per_value() -> anyhow::Result<()> {
    let store = std::sync::Arc::new(MemoryStore::new());
    let schema = std::sync::Arc::new(PropertySchema::standard());

    let mut handles = Vec::new();
    for _ in 0..8 {
        let store = store.clone();
        let schema = schema.clone();
        handles.push(tokio::spawn(async move {
            store
                .insert(&StringRecord::new(&schema, "racecar", Utc::now()))
                .await
        }));
    }

    let mut stored = 0;
    for handle in handles {
        if handle.await?.is_ok() {
            stored += 1;
        }
    }
    assert_eq!(stored, 1);
    assert_eq!(store.len().await, 1);
    Ok(())
}
