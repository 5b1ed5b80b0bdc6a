//! Trigger-phrase table for the natural-language translator.
//!
//! Rows are tried in order at every token position, so a longer phrase must
//! come before any shorter phrase it starts with. New vocabulary is a new row.

use crate::predicate::Operator;

/// How a trigger obtains its comparison value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    /// The integer token right after the phrase.
    Number,
    /// A value the phrase itself implies.
    Implied(ImpliedValue),
    /// `true`, or `false` when a negation word precedes the phrase.
    Flag,
    /// The single-character token after the phrase.
    Letter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpliedValue {
    Integer(i64),
    Text(&'static str),
}

/// One row of the trigger table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trigger {
    /// Space-separated, already-normalized phrase.
    pub phrase: &'static str,
    /// Target property; `None` means the unit noun after the number decides.
    pub field: Option<&'static str>,
    pub operator: Operator,
    pub value: ValueSource,
}

impl Trigger {
    const fn counted(phrase: &'static str, operator: Operator) -> Self {
        Self {
            phrase,
            field: None,
            operator,
            value: ValueSource::Number,
        }
    }

    const fn number(phrase: &'static str, field: &'static str, operator: Operator) -> Self {
        Self {
            phrase,
            field: Some(field),
            operator,
            value: ValueSource::Number,
        }
    }

    const fn implied(
        phrase: &'static str,
        field: &'static str,
        operator: Operator,
        value: ImpliedValue,
    ) -> Self {
        Self {
            phrase,
            field: Some(field),
            operator,
            value: ValueSource::Implied(value),
        }
    }

    const fn flag(phrase: &'static str, field: &'static str) -> Self {
        Self {
            phrase,
            field: Some(field),
            operator: Operator::Eq,
            value: ValueSource::Flag,
        }
    }

    const fn letter(phrase: &'static str, field: &'static str, operator: Operator) -> Self {
        Self {
            phrase,
            field: Some(field),
            operator,
            value: ValueSource::Letter,
        }
    }
}

/// Words that flip a following boolean trigger.
pub const NEGATIONS: &[&str] = &[
    "not", "non", "no", "never", "isnt", "arent", "dont", "doesnt",
];

/// How many tokens before a boolean trigger are searched for a negation.
pub const NEGATION_WINDOW: usize = 3;

/// Filler tokens skipped before a letter value.
pub const LETTER_FILLERS: &[&str] = &["the", "letter", "character"];

pub const DEFAULT_TRIGGERS: &[Trigger] = &[
    // Comparisons whose field comes from the unit noun ("at least 3 vowels").
    Trigger::counted("no more than", Operator::Le),
    Trigger::counted("not more than", Operator::Le),
    Trigger::counted("no fewer than", Operator::Ge),
    Trigger::counted("no less than", Operator::Ge),
    Trigger::counted("at least", Operator::Ge),
    Trigger::counted("at most", Operator::Le),
    Trigger::counted("more than", Operator::Gt),
    Trigger::counted("fewer than", Operator::Lt),
    Trigger::counted("less than", Operator::Lt),
    Trigger::counted("exactly", Operator::Eq),
    // Length.
    Trigger::number("longer than", "length", Operator::Gt),
    Trigger::number("shorter than", "length", Operator::Lt),
    Trigger::number("length of", "length", Operator::Eq),
    Trigger::number("of length", "length", Operator::Eq),
    // Word count.
    Trigger::implied("single word", "word_count", Operator::Eq, ImpliedValue::Integer(1)),
    Trigger::implied("one word", "word_count", Operator::Eq, ImpliedValue::Integer(1)),
    Trigger::implied("multi word", "word_count", Operator::Gt, ImpliedValue::Integer(1)),
    Trigger::implied("multiple words", "word_count", Operator::Gt, ImpliedValue::Integer(1)),
    // Palindrome.
    Trigger::flag("palindromes", "palindrome"),
    Trigger::flag("palindrome", "palindrome"),
    Trigger::flag("palindromic", "palindrome"),
    // Character membership.
    Trigger::implied(
        "first vowel",
        "distinct_characters",
        Operator::Contains,
        ImpliedValue::Text("a"),
    ),
    Trigger::letter("containing the letter", "distinct_characters", Operator::Contains),
    Trigger::letter("contains the letter", "distinct_characters", Operator::Contains),
    Trigger::letter("contain the letter", "distinct_characters", Operator::Contains),
    Trigger::letter("containing the character", "distinct_characters", Operator::Contains),
    Trigger::letter("with the letter", "distinct_characters", Operator::Contains),
    Trigger::letter("having the letter", "distinct_characters", Operator::Contains),
    Trigger::letter("has the letter", "distinct_characters", Operator::Contains),
    // Boundaries.
    Trigger::letter("starting with", "first_character", Operator::Eq),
    Trigger::letter("starts with", "first_character", Operator::Eq),
    Trigger::letter("start with", "first_character", Operator::Eq),
    Trigger::letter("beginning with", "first_character", Operator::Eq),
    Trigger::letter("begins with", "first_character", Operator::Eq),
    Trigger::letter("ending with", "last_character", Operator::Eq),
    Trigger::letter("ends with", "last_character", Operator::Eq),
    Trigger::letter("end with", "last_character", Operator::Eq),
];

/// Map the unit noun at `tokens[pos..]` to the property it counts.
///
/// Returns the property name and how many tokens the unit spans.
#[must_use]
pub fn unit_at(tokens: &[&str], pos: usize) -> Option<(&'static str, usize)> {
    let is_chars = |t: &str| {
        matches!(
            t,
            "characters" | "character" | "chars" | "char" | "letters" | "letter"
        )
    };

    match *tokens.get(pos)? {
        "unique" | "distinct" | "different"
            if tokens.get(pos + 1).copied().is_some_and(is_chars) =>
        {
            Some(("unique_character_count", 2))
        }
        "vowels" | "vowel" => Some(("vowel_count", 1)),
        "words" | "word" => Some(("word_count", 1)),
        t if is_chars(t) => Some(("length", 1)),
        _ => None,
    }
}

/// Read an integer token: digits or an English number word up to twenty.
#[must_use]
pub fn number_value(token: &str) -> Option<i64> {
    const WORDS: [&str; 21] = [
        "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
        "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
        "nineteen", "twenty",
    ];

    if let Ok(n) = token.parse::<i64>() {
        return Some(n);
    }
    WORDS
        .iter()
        .position(|w| *w == token)
        .and_then(|n| i64::try_from(n).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_longer_phrases_precede_their_prefixes() {
        for (i, earlier) in DEFAULT_TRIGGERS.iter().enumerate() {
            let prefix = format!("{} ", earlier.phrase);
            for later in &DEFAULT_TRIGGERS[i + 1..] {
                assert!(
                    !later.phrase.starts_with(&prefix),
                    "'{}' is shadowed by the earlier '{}'",
                    later.phrase,
                    earlier.phrase
                );
            }
        }
    }

    #[test]
    fn test_unit_resolution() {
        let tokens = ["unique", "characters", "vowels", "words", "chars", "apples"];
        assert_eq!(unit_at(&tokens, 0), Some(("unique_character_count", 2)));
        assert_eq!(unit_at(&tokens, 1), Some(("length", 1)));
        assert_eq!(unit_at(&tokens, 2), Some(("vowel_count", 1)));
        assert_eq!(unit_at(&tokens, 3), Some(("word_count", 1)));
        assert_eq!(unit_at(&tokens, 4), Some(("length", 1)));
        assert_eq!(unit_at(&tokens, 5), None);
        assert_eq!(unit_at(&tokens, 6), None);
    }

    #[test]
    fn test_number_value() {
        assert_eq!(number_value("5"), Some(5));
        assert_eq!(number_value("12"), Some(12));
        assert_eq!(number_value("three"), Some(3));
        assert_eq!(number_value("twenty"), Some(20));
        assert_eq!(number_value("many"), None);
    }
}
