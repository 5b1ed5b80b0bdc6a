//! Integration tests for the catalog over both record stores.
//!
//! These tests verify that:
//! - Creating a string analyzes and persists it, and duplicates conflict
//! - Missing strings are reported as not found on read and delete
//! - Structured and natural-language filters select the same records
//! - Listing preserves creation order

use std::sync::Arc;

use strand_core::{
    Error, FilterCriteria, PropertySchema, PropertyValue, StringCatalog, StringRecordRepo,
};
use strand_store::{MemoryStore, SqlStore};

fn catalog(repo: Arc<dyn StringRecordRepo>) -> StringCatalog {
    StringCatalog::new(Arc::new(PropertySchema::standard()), repo)
}

async fn sqlite_catalog() -> anyhow::Result<StringCatalog> {
    let store = SqlStore::new("sqlite::memory:").await?;
    Ok(catalog(Arc::new(store)))
}

fn memory_catalog() -> StringCatalog {
    catalog(Arc::new(MemoryStore::new()))
}

async fn seed(catalog: &StringCatalog, values: &[&str]) -> anyhow::Result<()> {
    for value in values {
        catalog.create(value).await?;
    }
    Ok(())
}

async fn check_create_get_delete(catalog: &StringCatalog) -> anyhow::Result<()> {
    let created = catalog.create("hello world").await?;
    assert_eq!(created.value, "hello world");
    assert_eq!(created.id, strand_core::sha256_hex("hello world"));
    assert_eq!(
        created.properties.get("word_count"),
        Some(&PropertyValue::Integer(2))
    );

    let fetched = catalog.get("hello world").await?;
    assert_eq!(fetched.value, created.value);
    assert_eq!(fetched.properties, created.properties);
    assert_eq!(fetched.properties.names(), created.properties.names());

    let duplicate = catalog.create("hello world").await;
    assert!(matches!(duplicate, Err(Error::Conflict(_))));

    catalog.delete("hello world").await?;
    assert!(matches!(
        catalog.get("hello world").await,
        Err(Error::NotFound(_))
    ));
    assert!(matches!(
        catalog.delete("hello world").await,
        Err(Error::NotFound(_))
    ));
    Ok(())
}

async fn check_filters(catalog: &StringCatalog) -> anyhow::Result<()> {
    seed(catalog, &["hello world", "level", "racecar", "noon", "stats are fun"]).await?;

    let all = catalog.list(None).await?;
    let values: Vec<_> = all.iter().map(|r| r.value.as_str()).collect();
    assert_eq!(
        values,
        vec!["hello world", "level", "racecar", "noon", "stats are fun"]
    );

    let palindromes = catalog
        .filter(&FilterCriteria {
            is_palindrome: Some(true),
            ..FilterCriteria::default()
        })
        .await?;
    assert_eq!(palindromes.count, 3);
    assert_eq!(palindromes.filters_applied.is_palindrome, Some(true));

    let long_single_words = catalog
        .filter(&FilterCriteria {
            min_length: Some(5),
            word_count: Some(1),
            ..FilterCriteria::default()
        })
        .await?;
    let values: Vec<_> = long_single_words
        .data
        .iter()
        .map(|r| r.value.as_str())
        .collect();
    assert_eq!(values, vec!["level", "racecar"]);

    let natural = catalog
        .filter_natural_language("all single word palindromic strings")
        .await?;
    assert_eq!(natural.count, 3);
    assert_eq!(natural.interpreted_query.matches.len(), 2);

    let with_z = catalog
        .filter_natural_language("strings containing the letter w")
        .await?;
    let values: Vec<_> = with_z.data.iter().map(|r| r.value.as_str()).collect();
    assert_eq!(values, vec!["hello world"]);

    let with_w = catalog
        .filter(&FilterCriteria {
            contains_character: Some("W".to_string()),
            ..FilterCriteria::default()
        })
        .await?;
    assert_eq!(with_w.count, 1);

    for raw in ["lo", "ol", ""] {
        let rejected = catalog
            .filter(&FilterCriteria {
                contains_character: Some(raw.to_string()),
                ..FilterCriteria::default()
            })
            .await;
        assert!(matches!(rejected, Err(Error::Schema(_))), "{raw:?}");
    }

    let nothing = catalog
        .filter_natural_language("longer than 20 characters")
        .await?;
    assert_eq!(nothing.count, 0);

    assert!(matches!(
        catalog.filter_natural_language("banana").await,
        Err(Error::Parse(_))
    ));
    Ok(())
}

#[tokio::test]
async fn test_memory_create_get_delete() -> anyhow::Result<()> {
    check_create_get_delete(&memory_catalog()).await
}

#[tokio::test]
async fn test_memory_filters() -> anyhow::Result<()> {
    check_filters(&memory_catalog()).await
}

#[tokio::test]
async fn test_sqlite_create_get_delete() -> anyhow::Result<()> {
    check_create_get_delete(&sqlite_catalog().await?).await
}

#[tokio::test]
async fn test_sqlite_filters() -> anyhow::Result<()> {
    check_filters(&sqlite_catalog().await?).await
}

#[tokio::test]
async fn test_invalid_structured_predicate_is_rejected_before_evaluation() -> anyhow::Result<()> {
    let catalog = memory_catalog();
    seed(&catalog, &["level"]).await?;

    let bad = strand_core::Predicate::Leaf(strand_core::Condition {
        field: "length".to_string(),
        operator: strand_core::Operator::Contains,
        value: PropertyValue::Integer(1),
    });
    assert!(matches!(
        catalog.list(Some(&bad)).await,
        Err(Error::Schema(_))
    ));
    Ok(())
}

#[tokio::test]
async fn test_empty_string_round_trips() -> anyhow::Result<()> {
    let catalog = sqlite_catalog().await?;
    let created = catalog.create("").await?;
    assert_eq!(
        created.properties.get("palindrome"),
        Some(&PropertyValue::Boolean(true))
    );
    assert_eq!(catalog.get("").await?.properties, created.properties);
    Ok(())
}
