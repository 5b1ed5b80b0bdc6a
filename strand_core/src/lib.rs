#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

pub mod analyzer;
pub mod catalog;
mod error;
pub mod evaluator;
pub mod predicate;
pub mod record;
pub mod schema;
pub mod translator;
mod util;

pub use analyzer::analyze;
pub use catalog::{FilterCriteria, FilteredStrings, NaturalLanguageMatches, StringCatalog};
pub use error::{Error, Result};
pub use evaluator::{evaluate, filter_records};
pub use predicate::{Condition, Operator, Predicate};
pub use record::{StringRecord, StringRecordRepo};
pub use schema::{
    PropertyDef, PropertySchema, PropertySet, PropertyType, PropertyValue, SchemaError,
};
pub use translator::{Interpretation, ParseError, Translator, TriggerMatch};
pub use util::sha256_hex;
