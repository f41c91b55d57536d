//! Round topology: which words belong to which round.
//!
//! With practice rounds enabled, odd round `2k-1` introduces batch `k` and even
//! round `2k` practices batches `1..=k` combined. Word sets are derived on demand
//! and never stored.

use crate::domain::{RoundIndex, Word, WordBatch};
use crate::error::{DrillError, Result};

/// What a round draws its words from (batch numbers are one-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundKind {
  Introduction { batch: usize },
  Practice { through: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundTopology {
  practice_rounds: bool,
}

impl RoundTopology {
  pub fn new(practice_rounds: bool) -> Self {
    Self { practice_rounds }
  }

  pub fn kind(&self, round: RoundIndex) -> RoundKind {
    let index = round.get() as usize;
    if !self.practice_rounds {
      // Every round introduces its own batch
      return RoundKind::Introduction { batch: index };
    }
    if round.is_odd() {
      RoundKind::Introduction { batch: index.div_ceil(2) }
    } else {
      RoundKind::Practice { through: index / 2 }
    }
  }

  /// Last valid round index for a deck with `batch_count` batches
  pub fn max_round_index(&self, batch_count: usize) -> u32 {
    let batches = u32::try_from(batch_count).unwrap_or(u32::MAX);
    if self.practice_rounds {
      batches.saturating_mul(2)
    } else {
      batches
    }
  }

  /// Check a requested round number against the deck size
  pub fn resolve(&self, round: u32, batch_count: usize) -> Result<RoundIndex> {
    let max = self.max_round_index(batch_count);
    match RoundIndex::new(round) {
      Some(index) if round <= max => Ok(index),
      _ => Err(DrillError::RoundOutOfRange { round, max }),
    }
  }

  /// Words of a round in presentation order. Empty when the batch is missing;
  /// callers treat that as a configuration error.
  pub fn words_for_round(&self, round: RoundIndex, batches: &[WordBatch]) -> Vec<Word> {
    match self.kind(round) {
      RoundKind::Introduction { batch } => batches
        .get(batch - 1)
        .map(|b| b.words.clone())
        .unwrap_or_default(),
      // Duplicates across batches are kept on purpose: they are drilled twice
      RoundKind::Practice { through } => batches
        .iter()
        .take(through)
        .flat_map(|b| b.words.iter().cloned())
        .collect(),
    }
  }

  /// Display title used when a round starts
  pub fn title(&self, round: RoundIndex) -> String {
    match self.kind(round) {
      RoundKind::Introduction { batch } => format!("Introduction Round {}", batch),
      RoundKind::Practice { through } => format!("Practice Round {}", through),
    }
  }
}

impl Default for RoundTopology {
  fn default() -> Self {
    Self::new(true)
  }
}

/// Words for a round with practice rounds enabled
pub fn words_for_round(round: RoundIndex, batches: &[WordBatch]) -> Vec<Word> {
  RoundTopology::default().words_for_round(round, batches)
}
