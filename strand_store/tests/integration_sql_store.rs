//! Integration tests for the sea-orm record store contract.
//!
//! These go straight to `SqlStore`, so the unique constraint on `value` is
//! what rejects a duplicate, not the catalog's lookup before insert.

use chrono::Utc;
use strand_core::{Error, PropertySchema, StringRecord, StringRecordRepo};
use strand_store::SqlStore;

#[tokio::test]
async fn test_duplicate_insert_is_a_conflict() -> anyhow::Result<()> {
    let schema = PropertySchema::standard();
    let store = SqlStore::new("sqlite::memory:").await?;

    store
        .insert(&StringRecord::new(&schema, "racecar", Utc::now()))
        .await?;
    let again = store
        .insert(&StringRecord::new(&schema, "racecar", Utc::now()))
        .await;
    assert!(matches!(again, Err(Error::Conflict(v)) if v == "racecar"));

    let values: Vec<_> = store.list().await?.into_iter().map(|r| r.value).collect();
    assert_eq!(values, vec!["racecar"]);
    Ok(())
}

#[tokio::test]
async fn test_list_order_and_missing_delete() -> anyhow::Result<()> {
    let schema = PropertySchema::standard();
    let store = SqlStore::new("sqlite::memory:").await?;

    for value in ["b", "a", "c"] {
        store
            .insert(&StringRecord::new(&schema, value, Utc::now()))
            .await?;
    }
    store.delete("a").await?;
    assert!(matches!(store.delete("a").await, Err(Error::NotFound(_))));
    assert!(store.find_by_value("a").await?.is_none());

    let values: Vec<_> = store.list().await?.into_iter().map(|r| r.value).collect();
    assert_eq!(values, vec!["b", "c"]);
    Ok(())
}
