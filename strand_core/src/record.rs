use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analyzer::analyze;
use crate::schema::PropertySchema;
use crate::schema::PropertySet;
use crate::util::sha256_hex;

/// An analyzed string, keyed by its literal value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringRecord {
    /// Hex SHA-256 of `value`.
    pub id: String,
    pub value: String,
    pub properties: PropertySet,
    pub created_at: DateTime<Utc>,
}

impl StringRecord {
    /// Analyze `value` and wrap it in a record stamped with `created_at`.
    #[must_use]
    pub fn new(schema: &PropertySchema, value: &str, created_at: DateTime<Utc>) -> Self {
        Self {
            id: sha256_hex(value),
            value: value.to_string(),
            properties: analyze(schema, value),
            created_at,
        }
    }
}

/// Key-value persistence of analyzed strings.
///
/// Implementations guarantee at most one record per distinct `value` and
/// return records from `list` in creation order.
#[async_trait]
pub trait StringRecordRepo: Send + Sync {
    /// Store a new record; `Error::Conflict` if the value is already present.
    async fn insert(&self, record: &StringRecord) -> crate::Result<()>;

    async fn find_by_value(&self, value: &str) -> crate::Result<Option<StringRecord>>;

    async fn list(&self) -> crate::Result<Vec<StringRecord>>;

    /// Remove a record; `Error::NotFound` if the value is absent.
    async fn delete(&self, value: &str) -> crate::Result<()>;
}
