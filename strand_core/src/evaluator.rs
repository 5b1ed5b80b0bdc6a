//! Filter evaluator.
//!
//! Predicates are expected to be validated against the schema before they
//! get here. A leaf that still does not line up with the property set simply
//! fails to match.

use rayon::prelude::*;
use tracing::debug;

use crate::predicate::{Condition, Operator, Predicate};
use crate::record::StringRecord;
use crate::schema::{PropertySet, PropertyValue};

/// Evaluate a predicate tree against one property set.
///
/// Conjunctions short-circuit on the first failing child.
#[must_use]
pub fn evaluate(predicate: &Predicate, properties: &PropertySet) -> bool {
    match predicate {
        Predicate::Leaf(condition) => compare(condition, properties),
        Predicate::And { children } => children.iter().all(|c| evaluate(c, properties)),
    }
}

/// Keep the records whose properties satisfy `predicate`, in input order.
#[must_use]
pub fn filter_records(predicate: &Predicate, records: Vec<StringRecord>) -> Vec<StringRecord> {
    records
        .into_par_iter()
        .filter(|record| evaluate(predicate, &record.properties))
        .collect()
}

fn compare(condition: &Condition, properties: &PropertySet) -> bool {
    let Some(actual) = properties.get(&condition.field) else {
        debug!("Property '{}' missing from property set", condition.field);
        return false;
    };

    match (actual, &condition.value) {
        (PropertyValue::Integer(a), PropertyValue::Integer(b)) => match condition.operator {
            Operator::Eq => a == b,
            Operator::Ne => a != b,
            Operator::Gt => a > b,
            Operator::Ge => a >= b,
            Operator::Lt => a < b,
            Operator::Le => a <= b,
            Operator::Contains => false,
        },
        (PropertyValue::Boolean(a), PropertyValue::Boolean(b)) => match condition.operator {
            Operator::Eq => a == b,
            Operator::Ne => a != b,
            _ => false,
        },
        (PropertyValue::Text(a), PropertyValue::Text(b)) => match condition.operator {
            Operator::Eq => a == b,
            Operator::Ne => a != b,
            Operator::Contains => a.contains(b.as_str()),
            _ => false,
        },
        _ => {
            debug!(
                "Type mismatch evaluating '{condition}': property is {}",
                actual.kind()
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze;
    use crate::schema::{PropertySchema, SchemaError};
    use chrono::Utc;

    fn leaf(
        schema: &PropertySchema,
        field: &str,
        op: &str,
        value: impl Into<PropertyValue>,
    ) -> Result<Predicate, SchemaError> {
        schema.build_predicate(field, op, value)
    }

    #[test]
    fn test_conjunction_over_deed() -> Result<(), SchemaError> {
        let schema = PropertySchema::standard();
        let deed = analyze(&schema, "deed");

        let both = Predicate::and(vec![
            leaf(&schema, "length", "gt", 3)?,
            leaf(&schema, "palindrome", "eq", true)?,
        ]);
        assert!(evaluate(&both, &deed));

        let too_long = Predicate::and(vec![
            leaf(&schema, "length", "gt", 4)?,
            leaf(&schema, "palindrome", "eq", true)?,
        ]);
        assert!(!evaluate(&too_long, &deed));

        let not_palindrome = Predicate::and(vec![
            leaf(&schema, "length", "gt", 3)?,
            leaf(&schema, "palindrome", "eq", false)?,
        ]);
        assert!(!evaluate(&not_palindrome, &deed));
        Ok(())
    }

    #[test]
    fn test_integer_operators() -> Result<(), SchemaError> {
        let schema = PropertySchema::standard();
        let props = analyze(&schema, "hello"); // length 5

        for (op, expected) in [
            ("eq", true),
            ("ne", false),
            ("gt", false),
            ("ge", true),
            ("lt", false),
            ("le", true),
        ] {
            let predicate = leaf(&schema, "length", op, 5)?;
            assert_eq!(evaluate(&predicate, &props), expected, "length {op} 5");
        }
        Ok(())
    }

    #[test]
    fn test_contains_on_string_property() -> Result<(), SchemaError> {
        let schema = PropertySchema::standard();
        let props = analyze(&schema, "Hello World");

        assert!(evaluate(
            &leaf(&schema, "distinct_characters", "contains", "w")?,
            &props
        ));
        assert!(!evaluate(
            &leaf(&schema, "distinct_characters", "contains", "z")?,
            &props
        ));
        Ok(())
    }

    #[test]
    fn test_empty_conjunction_matches() {
        let schema = PropertySchema::standard();
        assert!(evaluate(&Predicate::and(vec![]), &analyze(&schema, "x")));
    }

    #[test]
    fn test_unvalidated_mismatch_does_not_match() {
        let schema = PropertySchema::standard();
        let props = analyze(&schema, "hello");

        let mismatched = Predicate::Leaf(Condition {
            field: "length".to_string(),
            operator: Operator::Eq,
            value: PropertyValue::from("5"),
        });
        assert!(!evaluate(&mismatched, &props));

        let missing = Predicate::Leaf(Condition {
            field: "nonexistent_field".to_string(),
            operator: Operator::Eq,
            value: PropertyValue::Integer(5),
        });
        assert!(!evaluate(&missing, &props));
    }

    #[test]
    fn test_filter_records_preserves_order() -> Result<(), SchemaError> {
        let schema = PropertySchema::standard();
        let now = Utc::now();
        let records: Vec<_> = ["level", "hello", "racecar", "world", "noon"]
            .iter()
            .map(|v| StringRecord::new(&schema, v, now))
            .collect();

        let palindromes = leaf(&schema, "palindrome", "eq", true)?;
        let kept: Vec<_> = filter_records(&palindromes, records)
            .into_iter()
            .map(|r| r.value)
            .collect();
        assert_eq!(kept, vec!["level", "racecar", "noon"]);
        Ok(())
    }
}
