//! Predicate grammar: leaf comparisons combined by conjunction.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::schema::{PropertyValue, SchemaError};

/// Comparison operator of a leaf predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
    Contains,
}

impl Operator {
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Gt => "gt",
            Self::Ge => "ge",
            Self::Lt => "lt",
            Self::Le => "le",
            Self::Contains => "contains",
        }
    }

    #[must_use]
    pub const fn symbol(&self) -> &str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Contains => "contains",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Operator {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "eq" | "=" | "==" => Ok(Self::Eq),
            "ne" | "!=" | "<>" => Ok(Self::Ne),
            "gt" | ">" => Ok(Self::Gt),
            "ge" | "gte" | ">=" => Ok(Self::Ge),
            "lt" | "<" => Ok(Self::Lt),
            "le" | "lte" | "<=" => Ok(Self::Le),
            "contains" => Ok(Self::Contains),
            _ => Err(SchemaError::UnknownOperator(s.to_string())),
        }
    }
}

/// A single `(field, operator, value)` comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Condition {
    pub field: String,
    pub operator: Operator,
    pub value: PropertyValue,
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.operator.symbol(), self.value)
    }
}

/// Predicate tree over a property set.
///
/// Leaves should be built through `PropertySchema::condition` or
/// `PropertySchema::build_predicate` so they are type-checked up front.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Predicate {
    Leaf(Condition),
    And { children: Vec<Predicate> },
}

impl Predicate {
    #[must_use]
    pub const fn and(children: Vec<Self>) -> Self {
        Self::And { children }
    }

    /// All leaf conditions, left to right.
    #[must_use]
    pub fn conditions(&self) -> Vec<&Condition> {
        let mut out = Vec::new();
        self.collect_conditions(&mut out);
        out
    }

    fn collect_conditions<'a>(&'a self, out: &mut Vec<&'a Condition>) {
        match self {
            Self::Leaf(condition) => out.push(condition),
            Self::And { children } => {
                for child in children {
                    child.collect_conditions(out);
                }
            }
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(condition) => write!(f, "{condition}"),
            Self::And { children } if children.is_empty() => f.write_str("true"),
            Self::And { children } => {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" AND ")?;
                    }
                    match child {
                        Self::And { children: inner } if inner.len() > 1 => write!(f, "({child})")?,
                        _ => write!(f, "{child}")?,
                    }
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(field: &str, operator: Operator, value: impl Into<PropertyValue>) -> Predicate {
        Predicate::Leaf(Condition {
            field: field.to_string(),
            operator,
            value: value.into(),
        })
    }

    #[test]
    fn test_operator_aliases() {
        assert_eq!(">=".parse::<Operator>(), Ok(Operator::Ge));
        assert_eq!("GT".parse::<Operator>(), Ok(Operator::Gt));
        assert_eq!("==".parse::<Operator>(), Ok(Operator::Eq));
        assert_eq!("contains".parse::<Operator>(), Ok(Operator::Contains));
        assert!("~".parse::<Operator>().is_err());
    }

    #[test]
    fn test_conditions_flatten_in_order() {
        let predicate = Predicate::and(vec![
            leaf("length", Operator::Gt, 3),
            Predicate::and(vec![leaf("palindrome", Operator::Eq, true)]),
            leaf("first_character", Operator::Eq, "d"),
        ]);
        let fields: Vec<_> = predicate
            .conditions()
            .iter()
            .map(|c| c.field.as_str())
            .collect();
        assert_eq!(fields, vec!["length", "palindrome", "first_character"]);
    }

    #[test]
    fn test_display() {
        let predicate = Predicate::and(vec![
            leaf("length", Operator::Gt, 5),
            leaf("palindrome", Operator::Eq, true),
        ]);
        assert_eq!(predicate.to_string(), "length > 5 AND palindrome = true");
        assert_eq!(Predicate::and(vec![]).to_string(), "true");
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_json_shape() {
        let predicate = Predicate::and(vec![leaf("distinct_characters", Operator::Contains, "z")]);
        let json = serde_json::to_value(&predicate).expect("predicate should serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "kind": "and",
                "children": [
                    {"kind": "leaf", "field": "distinct_characters", "operator": "contains", "value": "z"}
                ]
            })
        );

        let back: Predicate = serde_json::from_value(json).expect("valid JSON should deserialize");
        assert_eq!(back, predicate);
    }
}
