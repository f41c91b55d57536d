//! Word content for the drill.
//!
//! The engine only needs an ordered list of batches and the practice-round
//! flag. Decks come from two places:
//! - **Builtin**: the bundled starter deck used by the standard and mirrored modes
//! - **Custom**: a JSON deck file chosen in config for the custom modes

pub mod builtin;
pub mod deck;

pub use builtin::builtin_deck;
pub use deck::{load_deck, parse_deck, Deck, DeckError};

use crate::domain::WordBatch;

/// Supplier of word batches for round topology
pub trait WordBatchSource {
    /// Batches in introduction order (batch 1 first)
    fn batches(&self) -> &[WordBatch];

    /// Whether even rounds practice all batches introduced so far
    fn practice_rounds_enabled(&self) -> bool;
}

impl<T: WordBatchSource + ?Sized> WordBatchSource for &T {
    fn batches(&self) -> &[WordBatch] {
        (**self).batches()
    }

    fn practice_rounds_enabled(&self) -> bool {
        (**self).practice_rounds_enabled()
    }
}
