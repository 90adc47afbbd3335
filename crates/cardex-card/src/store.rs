//! Generation-based corpus storage
//!
//! The store holds at most one generation at a time. A load decodes the
//! whole document before touching the slot, so readers either see the old
//! corpus or the new one, never a mix, and a failed load leaves the active
//! generation exactly as it was.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use thiserror::Error;

use crate::card::Card;

/// Corpus ingestion failure. The active generation is untouched.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("malformed card document: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Lookup failure against the active generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CardStoreError {
    #[error("no corpus has been loaded")]
    NotInitialized,

    #[error("card index {index} out of range for corpus of {size} cards")]
    OutOfRange { index: usize, size: usize },
}

/// One immutable version of the corpus
///
/// Card identifiers are dense positions `0..len()`, stable for the lifetime
/// of the generation.
#[derive(Debug)]
pub struct Generation {
    id: u64,
    cards: Vec<Card>,
}

impl Generation {
    /// Monotonic id, unique per successful load
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    /// Cards in identifier order
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

/// The single mutable slot holding the active generation
#[derive(Debug, Default)]
pub struct CardStore {
    active: RwLock<Option<Arc<Generation>>>,
    next_id: AtomicU64,
}

impl CardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `document` (a JSON array of card records) and swap it in as
    /// the new active generation.
    ///
    /// All-or-nothing: one malformed element fails the whole load and the
    /// previous generation stays active. Decoding happens outside the lock;
    /// only the pointer swap is serialized.
    pub fn load(&self, document: &str) -> Result<Arc<Generation>, CorpusError> {
        let cards: Vec<Card> = serde_json::from_str(document)?;
        let mut slot = self.active.write().unwrap_or_else(PoisonError::into_inner);
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let generation = Arc::new(Generation { id, cards });
        *slot = Some(Arc::clone(&generation));
        Ok(generation)
    }

    /// The active generation, if any. The snapshot stays consistent even
    /// when a later `load` swaps in a replacement.
    pub fn snapshot(&self) -> Option<Arc<Generation>> {
        self.active
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of cards in the active generation; zero before the first load
    pub fn size(&self) -> usize {
        self.snapshot().map_or(0, |generation| generation.len())
    }

    /// Bounds-checked lookup into the active generation
    pub fn get(&self, index: usize) -> Result<Card, CardStoreError> {
        let generation = self.snapshot().ok_or(CardStoreError::NotInitialized)?;
        generation
            .get(index)
            .cloned()
            .ok_or(CardStoreError::OutOfRange {
                index,
                size: generation.len(),
            })
    }
}
