//! Property analyzer.
//!
//! Every extractor is a pure function of the raw string. Counts work on raw
//! Unicode scalar values; only the palindrome check and the character-set
//! properties fold case.

use std::collections::HashSet;

use crate::schema::{PropertyDef, PropertySchema, PropertySet, PropertyType, PropertyValue};
use crate::util::sha256_hex;

const VOWELS: &str = "aeiouAEIOU";

/// Analyze a string against a schema.
///
/// Never fails: every definition in the schema yields a value, including for
/// the empty string.
#[must_use]
pub fn analyze(schema: &PropertySchema, value: &str) -> PropertySet {
    let mut properties = PropertySet::new();
    for def in schema.iter() {
        properties.insert(def.name, (def.extract)(value));
    }
    properties
}

/// The standard property definitions, in schema order.
#[must_use]
pub fn standard_properties() -> Vec<PropertyDef> {
    vec![
        PropertyDef::new(
            "length",
            PropertyType::Integer,
            "number of characters",
            length,
        ),
        PropertyDef::new(
            "palindrome",
            PropertyType::Boolean,
            "reads the same reversed, ignoring case and non-alphanumerics",
            palindrome,
        ),
        PropertyDef::new(
            "vowel_count",
            PropertyType::Integer,
            "number of a, e, i, o, u in either case",
            vowel_count,
        ),
        PropertyDef::new(
            "unique_character_count",
            PropertyType::Integer,
            "number of distinct characters, case-sensitive",
            unique_character_count,
        ),
        PropertyDef::new(
            "word_count",
            PropertyType::Integer,
            "number of whitespace-separated words",
            word_count,
        ),
        PropertyDef::new(
            "distinct_characters",
            PropertyType::String,
            "distinct lower-cased non-whitespace characters in order of appearance",
            distinct_characters,
        ),
        PropertyDef::new(
            "first_character",
            PropertyType::String,
            "lower-cased first character",
            first_character,
        ),
        PropertyDef::new(
            "last_character",
            PropertyType::String,
            "lower-cased last character",
            last_character,
        ),
        PropertyDef::new(
            "sha256_hash",
            PropertyType::String,
            "hex SHA-256 of the UTF-8 bytes",
            sha256_hash,
        ),
    ]
}

fn count(n: usize) -> PropertyValue {
    PropertyValue::Integer(i64::try_from(n).unwrap_or(i64::MAX))
}

fn length(value: &str) -> PropertyValue {
    count(value.chars().count())
}

fn palindrome(value: &str) -> PropertyValue {
    let cleaned: Vec<char> = value
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect();
    PropertyValue::Boolean(cleaned.iter().eq(cleaned.iter().rev()))
}

fn vowel_count(value: &str) -> PropertyValue {
    count(value.chars().filter(|c| VOWELS.contains(*c)).count())
}

fn unique_character_count(value: &str) -> PropertyValue {
    count(value.chars().collect::<HashSet<_>>().len())
}

fn word_count(value: &str) -> PropertyValue {
    count(value.split_whitespace().count())
}

fn distinct_characters(value: &str) -> PropertyValue {
    let mut seen = HashSet::new();
    let distinct: String = value
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .filter(|c| seen.insert(*c))
        .collect();
    PropertyValue::Text(distinct)
}

fn first_character(value: &str) -> PropertyValue {
    PropertyValue::Text(
        value
            .chars()
            .next()
            .map(|c| c.to_lowercase().collect())
            .unwrap_or_default(),
    )
}

fn last_character(value: &str) -> PropertyValue {
    PropertyValue::Text(
        value
            .chars()
            .next_back()
            .map(|c| c.to_lowercase().collect())
            .unwrap_or_default(),
    )
}

fn sha256_hash(value: &str) -> PropertyValue {
    PropertyValue::Text(sha256_hex(value))
}
