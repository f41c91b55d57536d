//! Deck files - JSON word lists grouped into batches.
//!
//! ```json
//! {
//!   "name": "Kitchen",
//!   "practice_rounds": true,
//!   "batches": [
//!     { "name": "Tools", "words": [{ "source": "なべ", "target": "pot" }] }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use super::WordBatchSource;
use crate::domain::WordBatch;

/// A named, ordered set of word batches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub name: String,
    #[serde(default = "default_practice_rounds")]
    pub practice_rounds: bool,
    pub batches: Vec<WordBatch>,
}

fn default_practice_rounds() -> bool {
    true
}

impl Deck {
    pub fn new(name: impl Into<String>, batches: Vec<WordBatch>) -> Self {
        Self {
            name: name.into(),
            practice_rounds: true,
            batches,
        }
    }

    pub fn with_practice_rounds(mut self, enabled: bool) -> Self {
        self.practice_rounds = enabled;
        self
    }

    pub fn word_count(&self) -> usize {
        self.batches.iter().map(WordBatch::len).sum()
    }

    /// Reject decks that cannot produce a playable round
    fn validate(&self) -> Result<(), DeckError> {
        if self.batches.is_empty() {
            return Err(DeckError::NoBatches);
        }
        for (b, batch) in self.batches.iter().enumerate() {
            for (w, word) in batch.words.iter().enumerate() {
                if word.source.trim().is_empty() || word.target.trim().is_empty() {
                    return Err(DeckError::BlankWord {
                        batch: b + 1,
                        position: w + 1,
                    });
                }
            }
        }
        Ok(())
    }
}

impl WordBatchSource for Deck {
    fn batches(&self) -> &[WordBatch] {
        &self.batches
    }

    fn practice_rounds_enabled(&self) -> bool {
        self.practice_rounds
    }
}

/// Deck loading errors.
#[derive(Debug, Error)]
pub enum DeckError {
    #[error("deck file not found: {0}")]
    FileNotFound(String),

    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("word {position} of batch {batch} has a blank side")]
    BlankWord { batch: usize, position: usize },

    #[error("deck has no batches")]
    NoBatches,
}

impl DeckError {
    /// Returns a user-facing error message without exposing filesystem paths.
    pub fn user_message(&self) -> &'static str {
        match self {
            DeckError::FileNotFound(_) => "Deck file not found",
            DeckError::Io { .. } => "Failed to read deck file",
            DeckError::Parse { .. } => "Failed to parse deck file",
            DeckError::BlankWord { .. } => "Deck contains a word with a blank side",
            DeckError::NoBatches => "Deck contains no batches",
        }
    }
}

/// Parse and validate deck JSON. `origin` names the source in errors.
pub fn parse_deck(json: &str, origin: &str) -> Result<Deck, DeckError> {
    let deck: Deck = serde_json::from_str(json).map_err(|source| DeckError::Parse {
        path: origin.to_string(),
        source,
    })?;
    deck.validate()?;
    Ok(deck)
}

/// Load a deck from a JSON file.
pub fn load_deck(path: &Path) -> Result<Deck, DeckError> {
    if !path.exists() {
        return Err(DeckError::FileNotFound(path.display().to_string()));
    }

    let content = fs::read_to_string(path).map_err(|source| DeckError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let deck = parse_deck(&content, &path.display().to_string())?;
    tracing::debug!(
        "Loaded deck '{}' with {} batches ({} words)",
        deck.name,
        deck.batches.len(),
        deck.word_count()
    );
    Ok(deck)
}
