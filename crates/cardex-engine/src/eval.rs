//! Predicate evaluation against a corpus generation
//!
//! A predicate tree is lowered once per query into a [`Matcher`] (needles
//! lowercased, regexes compiled), then applied to every card in identifier
//! order. Conjunctions short-circuit on the first failing child.

use std::borrow::Cow;
use std::sync::LazyLock;

use cardex_ast::{Field, MatchMode, Predicate};
use cardex_card::{Card, Generation};
use regex::Regex;
use thiserror::Error;

/// Reminder text is parenthesized; `oracle:` matches ignore it,
/// `fulloracle:` keeps it.
static REMINDER_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(.*?\)").expect("reminder pattern is valid"));

/// Lowering failure. Patterns are validated at parse time, so this only
/// fires for trees built by hand.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("invalid regex pattern: {0}")]
    Regex(#[from] regex::Error),
}

/// Evaluation knobs
#[derive(Debug, Clone)]
pub struct EvalOptions {
    /// Field an unqualified bare term searches
    pub default_field: Field,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self {
            default_field: Field::Name,
        }
    }
}

/// A predicate tree lowered for repeated application
enum Matcher {
    All(Vec<Matcher>),
    Contains { field: Field, needle: String },
    Pattern { field: Field, regex: Regex },
}

impl Matcher {
    fn compile(predicate: &Predicate, options: &EvalOptions) -> Result<Matcher, EvalError> {
        match predicate {
            Predicate::Conjunction { terms } => Ok(Matcher::All(
                terms
                    .iter()
                    .map(|term| Matcher::compile(term, options))
                    .collect::<Result<_, _>>()?,
            )),
            Predicate::BareTerm { value } => Ok(Matcher::Contains {
                field: options.default_field,
                needle: value.to_lowercase(),
            }),
            Predicate::FieldMatch { field, mode, value } => match mode {
                MatchMode::Substring | MatchMode::Exact => Ok(Matcher::Contains {
                    field: *field,
                    needle: value.to_lowercase(),
                }),
                MatchMode::Regex => Ok(Matcher::Pattern {
                    field: *field,
                    regex: Regex::new(value)?,
                }),
            },
        }
    }

    fn matches(&self, card: &Card) -> bool {
        match self {
            Matcher::All(children) => children.iter().all(|child| child.matches(card)),
            Matcher::Contains { field, needle } => {
                any_field_text(card, *field, |text| text.to_lowercase().contains(needle))
            }
            Matcher::Pattern { field, regex } => {
                any_field_text(card, *field, |text| regex.is_match(text))
            }
        }
    }
}

/// Apply `test` to each text the field exposes; any hit is a match
fn any_field_text(card: &Card, field: Field, test: impl Fn(&str) -> bool) -> bool {
    match field {
        Field::Name => card.names().any(|text| test(text)),
        Field::TypeLine => card.type_lines().any(|text| test(text)),
        Field::FullOracle => card.oracle_texts().any(|text| test(text)),
        Field::Oracle => card
            .oracle_texts()
            .any(|text| test(strip_reminder(text).as_ref())),
    }
}

fn strip_reminder(text: &str) -> Cow<'_, str> {
    REMINDER_TEXT.replace_all(text, "")
}

/// Evaluate a predicate tree against a generation, returning the matching
/// card identifiers in ascending (corpus) order.
pub fn evaluate(
    predicate: &Predicate,
    generation: &Generation,
    options: &EvalOptions,
) -> Result<Vec<usize>, EvalError> {
    let matcher = Matcher::compile(predicate, options)?;
    let mut matches = Vec::new();
    for (index, card) in generation.cards().iter().enumerate() {
        if matcher.matches(card) {
            matches.push(index);
        }
    }
    Ok(matches)
}
