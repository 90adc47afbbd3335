//! cardex-engine: predicate evaluation and the engine facade
//!
//! This crate ties the pipeline together behind four operations:
//! - `feed_cards`: ingest a corpus document, atomically replacing the
//!   active generation
//! - `query_cards`: parse a query and scan the corpus for matches
//! - `parse_query`: parse only, for inspection and diagnostics
//! - `get_card`: bounds-checked lookup of a full record
//!
//! The engine is an explicitly constructed object; hosts hold one and share
//! it by reference. Every operation returns a typed result, never a silent
//! empty success standing in for an error.

mod engine;
mod eval;

pub use engine::{Engine, EngineError, EngineOptions, FeedSummary};
pub use eval::{evaluate, EvalError, EvalOptions};

// Record types returned by `get_card`
pub use cardex_card::{Card, CardFace};
