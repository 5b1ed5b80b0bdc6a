//! In-process record store.

use async_trait::async_trait;
use strand_core::{Error, Result, StringRecord, StringRecordRepo};
use tokio::sync::RwLock;
use tracing::debug;

/// Insertion-ordered store held in memory; contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<StringRecord>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl StringRecordRepo for MemoryStore {
    async fn insert(&self, record: &StringRecord) -> Result<()> {
        let mut records = self.records.write().await;
        if records.iter().any(|r| r.value == record.value) {
            return Err(Error::Conflict(record.value.clone()));
        }
        records.push(record.clone());
        debug!("Inserted record {} ({} total)", record.id, records.len());
        Ok(())
    }

    async fn find_by_value(&self, value: &str) -> Result<Option<StringRecord>> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .find(|r| r.value == value)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<StringRecord>> {
        Ok(self.records.read().await.clone())
    }

    async fn delete(&self, value: &str) -> Result<()> {
        let mut records = self.records.write().await;
        let index = records
            .iter()
            .position(|r| r.value == value)
            .ok_or_else(|| Error::NotFound(value.to_string()))?;
        records.remove(index);
        Ok(())
    }
}
