//! Shared syntax types for the card query language
//!
//! The parser produces a [`Predicate`] tree; leaves carry a [`Field`] and a
//! [`MatchMode`]. [`Span`]s are byte offsets into the query string and back
//! every token and syntax error.

use serde::{Deserialize, Serialize};

/// A byte range in the query source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A queryable card field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Display name (and the name of each face)
    Name,
    /// The type line, e.g. "Creature — Goblin Scout"
    TypeLine,
    /// Rules text with parenthesized reminder text stripped
    Oracle,
    /// Rules text verbatim, reminder text included
    FullOracle,
}

impl Field {
    /// Resolve a `field:` keyword, case-insensitively.
    ///
    /// Aliases follow the search syntax users already write by hand:
    /// `t:creature`, `o:draw`, `fo:deathtouch`.
    pub fn from_keyword(keyword: &str) -> Option<Field> {
        match keyword.to_ascii_lowercase().as_str() {
            "name" => Some(Field::Name),
            "type" | "t" => Some(Field::TypeLine),
            "oracle" | "o" => Some(Field::Oracle),
            "fulloracle" | "fo" => Some(Field::FullOracle),
            _ => None,
        }
    }

    /// The canonical keyword for this field
    pub fn keyword(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::TypeLine => "type",
            Field::Oracle => "oracle",
            Field::FullOracle => "fulloracle",
        }
    }
}

/// How a leaf predicate compares its value against field text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Case-insensitive containment of a bare token
    Substring,
    /// Case-insensitive containment of a quoted phrase; may hold whitespace
    Exact,
    /// Case-sensitive regex search
    Regex,
}

/// A parsed query
///
/// The root is always a `Conjunction`; the empty conjunction matches every
/// card. A tree is built per query and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum Predicate {
    /// Every child must match
    Conjunction { terms: Vec<Predicate> },
    /// A `field:value` leaf
    FieldMatch {
        field: Field,
        mode: MatchMode,
        value: String,
    },
    /// An unqualified term, matched against the engine's default field
    BareTerm { value: String },
}

impl Predicate {
    pub fn conjunction(terms: Vec<Predicate>) -> Self {
        Predicate::Conjunction { terms }
    }
}
