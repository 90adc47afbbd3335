//! The four-operation engine facade
//!
//! `feed_cards` ingests a corpus document, `query_cards` parses and
//! evaluates a query, `parse_query` exposes the predicate tree without
//! evaluating it, and `get_card` looks a record up by identifier. The
//! engine starts uninitialized and becomes ready on the first successful
//! feed; a failed feed never disturbs the active corpus.

use std::time::Instant;

use cardex_ast::{Field, Predicate};
use cardex_card::{Card, CardStore, CardStoreError, CorpusError};
use cardex_parser::{ParseOptions, SyntaxError};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::eval::{self, EvalError, EvalOptions};

/// Failure surface of every engine operation
#[derive(Debug, Error)]
pub enum EngineError {
    /// The corpus document did not decode; the active generation is intact
    #[error(transparent)]
    Corpus(#[from] CorpusError),

    /// The query is malformed; nothing was evaluated
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// A predicate tree failed to lower for evaluation
    #[error(transparent)]
    Eval(#[from] EvalError),

    /// No successful `feed_cards` has happened yet
    #[error("engine not initialized: feed a card corpus first")]
    NotInitialized,

    /// The identifier is outside the active generation
    #[error("card index {index} out of range for corpus of {size} cards")]
    NotFound { index: usize, size: usize },
}

impl From<CardStoreError> for EngineError {
    fn from(err: CardStoreError) -> Self {
        match err {
            CardStoreError::NotInitialized => EngineError::NotInitialized,
            CardStoreError::OutOfRange { index, size } => EngineError::NotFound { index, size },
        }
    }
}

/// Engine construction knobs
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Field an unqualified query term searches
    pub default_field: Field,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            default_field: Field::Name,
        }
    }
}

/// Outcome of a successful corpus feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeedSummary {
    /// Id of the generation that is now active
    pub generation: u64,
    /// Number of cards it holds
    pub cards: usize,
}

/// The card query engine
///
/// Owns the corpus store; construct one explicitly and share it by
/// reference. All operations take `&self`: readers work against consistent
/// generation snapshots while feeds swap the corpus atomically.
#[derive(Debug, Default)]
pub struct Engine {
    store: CardStore,
    options: EngineOptions,
}

impl Engine {
    /// An engine with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine with explicit options
    pub fn with_options(options: EngineOptions) -> Self {
        Self {
            store: CardStore::new(),
            options,
        }
    }

    /// Replace the corpus with the cards decoded from `document`.
    ///
    /// On failure the previously active generation, if any, stays in place.
    pub fn feed_cards(&self, document: &str) -> Result<FeedSummary, EngineError> {
        let start = Instant::now();
        let generation = self.store.load(document)?;
        let summary = FeedSummary {
            generation: generation.id(),
            cards: generation.len(),
        };
        info!(
            generation = summary.generation,
            cards = summary.cards,
            elapsed = ?start.elapsed(),
            "corpus loaded"
        );
        Ok(summary)
    }

    /// Parse `query` and collect matching card identifiers in corpus order
    pub fn query_cards(&self, query: &str) -> Result<Vec<usize>, EngineError> {
        let generation = self.store.snapshot().ok_or(EngineError::NotInitialized)?;
        let predicate = self.parse(query)?;

        let start = Instant::now();
        let matches = eval::evaluate(&predicate, &generation, &self.eval_options())?;
        debug!(
            query,
            matches = matches.len(),
            cards = generation.len(),
            elapsed = ?start.elapsed(),
            "query evaluated"
        );
        Ok(matches)
    }

    /// Parse `query` without evaluating it. Does not touch the corpus, so
    /// it works before any `feed_cards`.
    pub fn parse_query(&self, query: &str) -> Result<Predicate, EngineError> {
        Ok(self.parse(query)?)
    }

    /// The full record stored at `index` in the active generation
    pub fn get_card(&self, index: usize) -> Result<Card, EngineError> {
        Ok(self.store.get(index)?)
    }

    /// Whether a corpus has been fed successfully
    pub fn is_ready(&self) -> bool {
        self.store.snapshot().is_some()
    }

    /// Cards in the active generation; zero before the first feed
    pub fn card_count(&self) -> usize {
        self.store.size()
    }

    fn parse(&self, query: &str) -> Result<Predicate, SyntaxError> {
        let options = ParseOptions {
            default_field: self.options.default_field,
        };
        cardex_parser::parse_with(query, &options)
    }

    fn eval_options(&self) -> EvalOptions {
        EvalOptions {
            default_field: self.options.default_field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORPUS: &str = r#"[
        {"name": "Counterspell", "type_line": "Instant", "oracle_text": "Counter target spell."},
        {"name": "Goblin Guide", "type_line": "Creature — Goblin Scout", "oracle_text": "Haste"},
        {"name": "Siege-Gang Commander", "type_line": "Creature — Goblin", "oracle_text": "When Siege-Gang Commander enters, create three 1/1 red Goblin creature tokens."}
    ]"#;

    fn ready_engine() -> Engine {
        let engine = Engine::new();
        engine.feed_cards(CORPUS).unwrap();
        engine
    }

    #[test]
    fn test_lifecycle_uninitialized_to_ready() {
        let engine = Engine::new();
        assert!(!engine.is_ready());
        assert_eq!(engine.card_count(), 0);

        let summary = engine.feed_cards(CORPUS).unwrap();
        assert_eq!(summary.cards, 3);
        assert_eq!(summary.generation, 1);
        assert!(engine.is_ready());
        assert_eq!(engine.card_count(), 3);
    }

    #[test]
    fn test_query_before_feed_is_not_initialized() {
        let engine = Engine::new();
        assert!(matches!(
            engine.query_cards("goblin"),
            Err(EngineError::NotInitialized)
        ));
        assert!(matches!(
            engine.get_card(0),
            Err(EngineError::NotInitialized)
        ));
    }

    #[test]
    fn test_parse_query_works_before_feed() {
        let engine = Engine::new();
        let tree = engine.parse_query("name:goblin").unwrap();
        assert!(matches!(tree, Predicate::Conjunction { ref terms } if terms.len() == 1));
    }

    #[test]
    fn test_query_cards_matches_in_corpus_order() {
        let engine = ready_engine();
        assert_eq!(engine.query_cards("name:goblin").unwrap(), vec![1]);
        assert_eq!(engine.query_cards("t:goblin").unwrap(), vec![1, 2]);
        assert_eq!(engine.query_cards("").unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_syntax_error_aborts_before_evaluation() {
        let engine = ready_engine();
        let err = engine.query_cards("foo:bar").unwrap_err();
        assert!(matches!(err, EngineError::Syntax(_)));
        assert!(err.to_string().contains("foo"));
    }

    #[test]
    fn test_failed_feed_keeps_engine_ready_with_old_corpus() {
        let engine = ready_engine();
        assert!(engine.feed_cards("garbage").is_err());
        assert!(engine.is_ready());
        assert_eq!(engine.card_count(), 3);
        assert_eq!(engine.get_card(0).unwrap().name, "Counterspell");
    }

    #[test]
    fn test_refeed_produces_a_new_generation() {
        let engine = ready_engine();
        let summary = engine
            .feed_cards(r#"[{"name": "Lightning Bolt"}]"#)
            .unwrap();
        assert_eq!(summary.generation, 2);
        assert_eq!(engine.card_count(), 1);
        assert_eq!(engine.query_cards("").unwrap(), vec![0]);
    }

    #[test]
    fn test_get_card_out_of_range() {
        let engine = ready_engine();
        assert!(matches!(
            engine.get_card(3),
            Err(EngineError::NotFound { index: 3, size: 3 })
        ));
    }

    #[test]
    fn test_default_field_option_changes_bare_terms() {
        let engine = Engine::with_options(EngineOptions {
            default_field: cardex_ast::Field::Oracle,
        });
        engine.feed_cards(CORPUS).unwrap();
        assert_eq!(engine.query_cards("counter").unwrap(), vec![0]);
        assert_eq!(engine.query_cards("tokens").unwrap(), vec![2]);
    }
}
