//! Property schema shared by the analyzer, evaluator and translator.
//!
//! The schema is an ordered list of `(name, type, extractor)` definitions.
//! It is constructed once and then only read; every component receives it
//! explicitly instead of reaching for global state.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

use crate::predicate::{Condition, Operator, Predicate};

/// Declared type of a property.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Integer,
    Boolean,
    String,
}

impl PropertyType {
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::String => "string",
        }
    }

    /// Whether `operator` is defined for values of this type.
    #[must_use]
    pub const fn supports(&self, operator: Operator) -> bool {
        match self {
            Self::Integer => !matches!(operator, Operator::Contains),
            Self::Boolean => matches!(operator, Operator::Eq | Operator::Ne),
            Self::String => matches!(operator, Operator::Eq | Operator::Ne | Operator::Contains),
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed property value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum PropertyValue {
    Boolean(bool),
    Integer(i64),
    Text(String),
}

impl PropertyValue {
    #[must_use]
    pub const fn kind(&self) -> PropertyType {
        match self {
            Self::Boolean(_) => PropertyType::Boolean,
            Self::Integer(_) => PropertyType::Integer,
            Self::Text(_) => PropertyType::String,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Computed properties of one string, in schema order.
///
/// Serialized as a JSON object whose key order follows the schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertySet {
    entries: Vec<(String, PropertyValue)>,
}

impl PropertySet {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Set a property, replacing an earlier value with the same name in place.
    pub fn insert(&mut self, name: impl Into<String>, value: PropertyValue) {
        let name = name.into();
        if let Some(slot) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for PropertySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PropertySet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SetVisitor;

        impl<'de> Visitor<'de> for SetVisitor {
            type Value = PropertySet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of property names to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut set = PropertySet::new();
                while let Some((name, value)) = access.next_entry::<String, PropertyValue>()? {
                    set.insert(name, value);
                }
                Ok(set)
            }
        }

        deserializer.deserialize_map(SetVisitor)
    }
}

/// Extractor computing one property from the raw string.
pub type Extractor = fn(&str) -> PropertyValue;

/// Definition of a single property.
#[derive(Debug, Clone)]
pub struct PropertyDef {
    pub name: &'static str,
    pub kind: PropertyType,
    pub description: &'static str,
    pub extract: Extractor,
}

impl PropertyDef {
    #[must_use]
    pub const fn new(
        name: &'static str,
        kind: PropertyType,
        description: &'static str,
        extract: Extractor,
    ) -> Self {
        Self {
            name,
            kind,
            description,
            extract,
        }
    }
}

/// Schema validation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("unknown property: '{0}'")]
    UnknownField(String),

    #[error("unknown operator: '{0}'")]
    UnknownOperator(String),

    #[error("operator '{operator}' is not defined for {kind} property '{field}'")]
    OperatorNotSupported {
        field: String,
        operator: Operator,
        kind: PropertyType,
    },

    #[error("invalid value for '{field}': expected {expected}, got '{got}'")]
    TypeMismatch {
        field: String,
        expected: PropertyType,
        got: String,
    },
}

/// Ordered set of property definitions.
#[derive(Debug, Clone, Default)]
pub struct PropertySchema {
    properties: Vec<PropertyDef>,
}

impl PropertySchema {
    /// Create an empty schema.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            properties: Vec::new(),
        }
    }

    /// Create the standard string schema.
    #[must_use]
    pub fn standard() -> Self {
        let mut schema = Self::empty();
        for def in crate::analyzer::standard_properties() {
            schema.register(def);
        }
        schema
    }

    /// Register a property, replacing a same-named definition in place.
    pub fn register(&mut self, def: PropertyDef) {
        if let Some(slot) = self.properties.iter_mut().find(|p| p.name == def.name) {
            *slot = def;
        } else {
            self.properties.push(def);
        }
    }

    /// Builder form of [`Self::register`].
    #[must_use]
    pub fn with(mut self, def: PropertyDef) -> Self {
        self.register(def);
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PropertyDef> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PropertyDef> {
        self.properties.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Build a typed, validated condition.
    ///
    /// # Errors
    /// Returns `SchemaError` if the field is unknown, the operator is not
    /// defined for the field's type, or the value has the wrong type.
    pub fn condition(
        &self,
        field: &str,
        operator: Operator,
        value: PropertyValue,
    ) -> Result<Condition, SchemaError> {
        let def = self
            .get(field)
            .ok_or_else(|| SchemaError::UnknownField(field.to_string()))?;

        if value.kind() != def.kind {
            return Err(SchemaError::TypeMismatch {
                field: field.to_string(),
                expected: def.kind,
                got: value.to_string(),
            });
        }

        if !def.kind.supports(operator) {
            return Err(SchemaError::OperatorNotSupported {
                field: field.to_string(),
                operator,
                kind: def.kind,
            });
        }

        Ok(Condition {
            field: def.name.to_string(),
            operator,
            value,
        })
    }

    /// Build a leaf predicate from caller-supplied criteria.
    ///
    /// # Errors
    /// Returns `SchemaError` on an unknown field, an unknown operator name or
    /// an operator/value that does not fit the field's declared type.
    pub fn build_predicate(
        &self,
        field: &str,
        operator: &str,
        value: impl Into<PropertyValue>,
    ) -> Result<Predicate, SchemaError> {
        let operator = operator.parse::<Operator>()?;
        self.condition(field, operator, value.into())
            .map(Predicate::Leaf)
    }

    /// Like [`Self::build_predicate`], but coerces a raw textual value to the
    /// field's declared type first.
    ///
    /// # Errors
    /// Returns `SchemaError` if the field or operator is unknown, or the raw
    /// value cannot be read as the field's type.
    pub fn parse_predicate(
        &self,
        field: &str,
        operator: &str,
        raw: &str,
    ) -> Result<Predicate, SchemaError> {
        let def = self
            .get(field)
            .ok_or_else(|| SchemaError::UnknownField(field.to_string()))?;

        let mismatch = || SchemaError::TypeMismatch {
            field: field.to_string(),
            expected: def.kind,
            got: raw.to_string(),
        };

        let value = match def.kind {
            PropertyType::Integer => {
                PropertyValue::Integer(raw.trim().parse::<i64>().map_err(|_| mismatch())?)
            }
            PropertyType::Boolean => match raw.trim().to_lowercase().as_str() {
                "true" | "yes" | "1" => PropertyValue::Boolean(true),
                "false" | "no" | "0" => PropertyValue::Boolean(false),
                _ => return Err(mismatch()),
            },
            PropertyType::String => PropertyValue::Text(raw.to_string()),
        };

        self.build_predicate(field, operator, value)
    }

    /// Check every leaf of a predicate tree against the schema.
    ///
    /// # Errors
    /// Returns the first `SchemaError` found, in left-to-right order.
    pub fn validate(&self, predicate: &Predicate) -> Result<(), SchemaError> {
        match predicate {
            Predicate::Leaf(condition) => self
                .condition(
                    &condition.field,
                    condition.operator,
                    condition.value.clone(),
                )
                .map(|_| ()),
            Predicate::And { children } => children.iter().try_for_each(|c| self.validate(c)),
        }
    }
}
