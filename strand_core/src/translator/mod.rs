//! Rule-based natural-language query translator.
//!
//! A query is normalized, split into tokens and scanned left to right against
//! the trigger table. Each matched trigger yields one schema-checked leaf;
//! the leaves are joined into a single conjunction in match order.

pub mod triggers;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::predicate::{Condition, Predicate};
use crate::schema::{PropertySchema, PropertyValue};
use triggers::{
    DEFAULT_TRIGGERS, ImpliedValue, LETTER_FILLERS, NEGATION_WINDOW, NEGATIONS, Trigger,
    ValueSource, number_value, unit_at,
};

/// Translation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("query not understood: '{query}'")]
    NothingRecognized { query: String },
}

/// One trigger that fired, with the leaf it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerMatch {
    pub phrase: String,
    pub condition: Condition,
}

/// Full account of how a query was understood.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interpretation {
    pub original: String,
    pub normalized: String,
    pub matches: Vec<TriggerMatch>,
    pub predicate: Predicate,
}

impl From<ImpliedValue> for PropertyValue {
    fn from(value: ImpliedValue) -> Self {
        match value {
            ImpliedValue::Integer(n) => Self::Integer(n),
            ImpliedValue::Text(s) => Self::Text(s.to_string()),
        }
    }
}

/// Translator bound to a schema and a trigger table.
#[derive(Debug, Clone, Copy)]
pub struct Translator<'a> {
    schema: &'a PropertySchema,
    triggers: &'a [Trigger],
}

impl<'a> Translator<'a> {
    /// Create a translator using the default trigger table.
    #[must_use]
    pub const fn new(schema: &'a PropertySchema) -> Self {
        Self {
            schema,
            triggers: DEFAULT_TRIGGERS,
        }
    }

    #[must_use]
    pub const fn with_triggers(schema: &'a PropertySchema, triggers: &'a [Trigger]) -> Self {
        Self { schema, triggers }
    }

    /// Translate free text into a conjunction of leaves.
    ///
    /// # Errors
    /// Returns `ParseError::NothingRecognized` when no trigger matches.
    pub fn translate(&self, query: &str) -> Result<Predicate, ParseError> {
        self.interpret(query).map(|i| i.predicate)
    }

    /// Translate and keep the per-trigger breakdown.
    ///
    /// # Errors
    /// Returns `ParseError::NothingRecognized` when no trigger matches.
    pub fn interpret(&self, query: &str) -> Result<Interpretation, ParseError> {
        let normalized = normalize(query);
        let tokens: Vec<&str> = normalized.split(' ').filter(|t| !t.is_empty()).collect();

        let mut matches = Vec::new();
        let mut cursor = 0;
        let mut boundary = 0;
        while cursor < tokens.len() {
            if let Some((found, end)) = self.match_at(&tokens, cursor, boundary) {
                debug!("Trigger '{}' -> {}", found.phrase, found.condition);
                matches.push(found);
                cursor = end;
                boundary = end;
            } else {
                cursor += 1;
            }
        }

        if matches.is_empty() {
            debug!("No trigger matched query '{query}'");
            return Err(ParseError::NothingRecognized {
                query: query.to_string(),
            });
        }

        let predicate = Predicate::and(
            matches
                .iter()
                .map(|m| Predicate::Leaf(m.condition.clone()))
                .collect(),
        );

        Ok(Interpretation {
            original: query.to_string(),
            normalized,
            matches,
            predicate,
        })
    }

    /// First trigger, in table order, that matches at `start` and yields a
    /// value the schema accepts.
    fn match_at(
        &self,
        tokens: &[&str],
        start: usize,
        boundary: usize,
    ) -> Option<(TriggerMatch, usize)> {
        self.triggers.iter().find_map(|trigger| {
            let after = phrase_end(trigger.phrase, tokens, start)?;
            let (field, value, end) = extract(trigger, tokens, start, after, boundary)?;
            match self.schema.condition(field, trigger.operator, value) {
                Ok(condition) => Some((
                    TriggerMatch {
                        phrase: trigger.phrase.to_string(),
                        condition,
                    },
                    end,
                )),
                Err(e) => {
                    debug!("Discarding trigger '{}': {e}", trigger.phrase);
                    None
                }
            }
        })
    }
}

/// Lower-case, drop apostrophes, turn other punctuation into spaces and
/// collapse runs of whitespace.
#[must_use]
pub fn normalize(query: &str) -> String {
    let spaced: String = query
        .chars()
        .filter(|c| !matches!(c, '\'' | '\u{2019}'))
        .flat_map(char::to_lowercase)
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn phrase_end(phrase: &str, tokens: &[&str], start: usize) -> Option<usize> {
    let mut pos = start;
    for word in phrase.split(' ') {
        if tokens.get(pos) != Some(&word) {
            return None;
        }
        pos += 1;
    }
    Some(pos)
}

fn is_negated(tokens: &[&str], start: usize, boundary: usize) -> bool {
    let from = start.saturating_sub(NEGATION_WINDOW).max(boundary);
    tokens[from..start].iter().any(|t| NEGATIONS.contains(t))
}

/// Resolve the field, value and end position for a trigger whose phrase
/// spans `start..after`. `None` discards the trigger.
///
/// A negated letter trigger is discarded: there is no negated condition to
/// express "not containing x".
fn extract(
    trigger: &Trigger,
    tokens: &[&str],
    start: usize,
    after: usize,
    boundary: usize,
) -> Option<(&'static str, PropertyValue, usize)> {
    match trigger.value {
        ValueSource::Number => {
            let n = number_value(tokens.get(after)?)?;
            let value = PropertyValue::Integer(n);
            match (trigger.field, unit_at(tokens, after + 1)) {
                (Some(field), Some((unit, span))) if unit == field => {
                    Some((field, value, after + 1 + span))
                }
                (Some(field), _) => Some((field, value, after + 1)),
                (None, Some((unit, span))) => Some((unit, value, after + 1 + span)),
                (None, None) => None,
            }
        }
        ValueSource::Implied(implied) => Some((trigger.field?, implied.into(), after)),
        ValueSource::Flag => {
            let negated = is_negated(tokens, start, boundary);
            Some((trigger.field?, PropertyValue::Boolean(!negated), after))
        }
        ValueSource::Letter => {
            if is_negated(tokens, start, boundary) {
                return None;
            }
            let mut pos = after;
            while tokens.get(pos).is_some_and(|t| LETTER_FILLERS.contains(t)) {
                pos += 1;
            }
            let mut chars = tokens.get(pos)?.chars();
            let letter = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            Some((trigger.field?, PropertyValue::Text(letter.to_string()), pos + 1))
        }
    }
}
