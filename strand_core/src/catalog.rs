//! Catalog service over a record repository.
//!
//! This is where the analyzer, evaluator and translator meet persistence:
//! - create analyzes and stores a string, rejecting duplicates
//! - get and delete address a record by its literal value
//! - list, filter and natural-language filtering evaluate predicates over
//!   every stored record, preserving creation order

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

use crate::evaluator::filter_records;
use crate::predicate::{Operator, Predicate};
use crate::record::{StringRecord, StringRecordRepo};
use crate::schema::{PropertySchema, PropertySet, PropertyType, PropertyValue, SchemaError};
use crate::translator::{Interpretation, Translator};
use crate::{Error, Result};

/// Structured filter parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_palindrome: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains_character: Option<String>,
}

impl FilterCriteria {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.is_palindrome.is_none()
            && self.min_length.is_none()
            && self.max_length.is_none()
            && self.word_count.is_none()
            && self.contains_character.is_none()
    }

    /// Convert to a conjunction of schema-checked leaves.
    ///
    /// No criteria yields an empty conjunction, which matches every record.
    ///
    /// # Errors
    /// Returns `SchemaError` if the schema lacks one of the properties used,
    /// or if `contains_character` is not exactly one character.
    pub fn to_predicate(&self, schema: &PropertySchema) -> std::result::Result<Predicate, SchemaError> {
        let mut leaves = Vec::new();

        if let Some(flag) = self.is_palindrome {
            leaves.push(schema.condition("palindrome", Operator::Eq, flag.into())?);
        }
        if let Some(min) = self.min_length {
            leaves.push(schema.condition("length", Operator::Ge, min.into())?);
        }
        if let Some(max) = self.max_length {
            leaves.push(schema.condition("length", Operator::Le, max.into())?);
        }
        if let Some(words) = self.word_count {
            leaves.push(schema.condition("word_count", Operator::Eq, words.into())?);
        }
        if let Some(ref character) = self.contains_character {
            let mut chars = character.chars();
            let (Some(single), None) = (chars.next(), chars.next()) else {
                return Err(SchemaError::TypeMismatch {
                    field: "contains_character".to_string(),
                    expected: PropertyType::String,
                    got: character.clone(),
                });
            };
            leaves.push(schema.condition(
                "distinct_characters",
                Operator::Contains,
                PropertyValue::Text(single.to_lowercase().collect()),
            )?);
        }

        Ok(Predicate::and(
            leaves.into_iter().map(Predicate::Leaf).collect(),
        ))
    }
}

/// Result of a structured filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilteredStrings {
    pub data: Vec<StringRecord>,
    pub count: usize,
    pub filters_applied: FilterCriteria,
}

/// Result of a natural-language filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NaturalLanguageMatches {
    pub data: Vec<StringRecord>,
    pub count: usize,
    pub interpreted_query: Interpretation,
}

/// String catalog backed by a record repository.
pub struct StringCatalog {
    schema: Arc<PropertySchema>,
    repo: Arc<dyn StringRecordRepo>,
}

impl StringCatalog {
    #[must_use]
    pub fn new(schema: Arc<PropertySchema>, repo: Arc<dyn StringRecordRepo>) -> Self {
        Self { schema, repo }
    }

    #[must_use]
    pub fn schema(&self) -> &PropertySchema {
        &self.schema
    }

    /// Analyze without persisting.
    #[must_use]
    pub fn analyze(&self, value: &str) -> PropertySet {
        crate::analyzer::analyze(&self.schema, value)
    }

    /// Analyze and store a new string.
    pub async fn create(&self, value: &str) -> Result<StringRecord> {
        if self.repo.find_by_value(value).await?.is_some() {
            return Err(Error::Conflict(value.to_string()));
        }

        let record = StringRecord::new(&self.schema, value, Utc::now());
        self.repo.insert(&record).await?;
        info!("Stored string {}", record.id);
        Ok(record)
    }

    pub async fn get(&self, value: &str) -> Result<StringRecord> {
        self.repo
            .find_by_value(value)
            .await?
            .ok_or_else(|| Error::NotFound(value.to_string()))
    }

    /// All records in creation order, optionally filtered.
    ///
    /// The predicate is validated against the schema before any record is
    /// evaluated.
    pub async fn list(&self, predicate: Option<&Predicate>) -> Result<Vec<StringRecord>> {
        if let Some(predicate) = predicate {
            self.schema.validate(predicate)?;
        }

        let records = self.repo.list().await?;
        let total = records.len();
        let records = match predicate {
            Some(predicate) => filter_records(predicate, records),
            None => records,
        };
        debug!("Listed {} of {} strings", records.len(), total);
        Ok(records)
    }

    /// Filter by the structured criteria.
    pub async fn filter(&self, criteria: &FilterCriteria) -> Result<FilteredStrings> {
        let predicate = criteria.to_predicate(&self.schema)?;
        let data = self.list(Some(&predicate)).await?;
        info!("Structured filter '{}' matched {} strings", predicate, data.len());
        Ok(FilteredStrings {
            count: data.len(),
            data,
            filters_applied: criteria.clone(),
        })
    }

    /// Translate a free-text query and filter by it.
    pub async fn filter_natural_language(&self, query: &str) -> Result<NaturalLanguageMatches> {
        let interpretation = Translator::new(&self.schema).interpret(query)?;
        let data = self.list(Some(&interpretation.predicate)).await?;
        info!(
            "Query '{}' interpreted as '{}', matched {} strings",
            query,
            interpretation.predicate,
            data.len()
        );
        Ok(NaturalLanguageMatches {
            count: data.len(),
            data,
            interpreted_query: interpretation,
        })
    }

    pub async fn delete(&self, value: &str) -> Result<()> {
        self.repo.delete(value).await?;
        info!("Deleted string '{}'", value);
        Ok(())
    }
}
