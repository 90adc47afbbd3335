//! cardex: an in-memory card search engine
//!
//! Feed a JSON corpus of card records once, then run structured queries
//! like `name:goblin t:creature oracle:/create.*token/` against it:
//!
//! ```ignore
//! use cardex::Engine;
//!
//! let engine = Engine::new();
//! engine.feed_cards(&document)?;
//! let ids = engine.query_cards("name:goblin")?;
//! let card = engine.get_card(ids[0])?;
//! ```
//!
//! The pipeline crates are re-exported for direct use.

pub use cardex_ast as ast;
pub use cardex_card as card;
pub use cardex_engine as engine;
pub use cardex_lexer as lexer;
pub use cardex_parser as parser;

pub use cardex_engine::{Engine, EngineError, EngineOptions, FeedSummary};
