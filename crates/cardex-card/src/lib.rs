//! Card records and the in-memory corpus store
//!
//! A corpus is ingested once per session as a JSON array of card records;
//! each successful load produces a new immutable [`Generation`] whose dense
//! positions are the card identifiers every query result refers to.

mod card;
mod store;

pub use card::{Card, CardFace};
pub use store::{CardStore, CardStoreError, CorpusError, Generation};
