//! Review queue for the Repeating phase with retry placement and deferred credit.
//!
//! Every answer mutates the queue:
//! - A match pops the front and may grant a credit
//! - A miss pulls every copy of the word, re-inserts it a few slots ahead and
//!   marks a pending credit, then pads the queue back up with random draws
//!
//! The round is complete once every word holds `required_correct` credits.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};

use crate::config;

/// Tunables for the review queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerParams {
  /// Size of the initial queue and minimum length after a miss
  pub queue_len: usize,
  /// Queue positions a missed word is re-inserted at
  pub retry_offsets: Vec<usize>,
  /// Confirmed credits each word needs before the round is complete
  pub required_correct: u32,
}

impl Default for SchedulerParams {
  fn default() -> Self {
    Self {
      queue_len: config::REVIEW_QUEUE_LEN,
      retry_offsets: config::RETRY_OFFSETS.to_vec(),
      required_correct: config::REQUIRED_CORRECT,
    }
  }
}

/// What a matched presentation earned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credit {
  /// Outside the Repeating phase, nothing is counted
  Unscored,
  /// Clean answer, credited right away
  Immediate,
  /// Make-up credit for an earlier miss
  MakeUp,
  /// Presentation already failed (live divergence), no credit
  Withheld,
}

/// Queue state for one Repeating phase.
///
/// Words are referred to by slot (their position in the round's word set) so
/// duplicates stay distinct in the queue, while counters are keyed by word key.
#[derive(Debug, Clone)]
pub struct RepetitionScheduler {
  keys: Vec<String>,
  params: SchedulerParams,
  queue: VecDeque<usize>,
  correct: HashMap<String, u32>,
  pending: HashSet<String>,
  presentation_failed: bool,
}

impl RepetitionScheduler {
  /// Start a fresh phase: all counts at zero, no pending credit, and a queue of
  /// `queue_len` draws taken with replacement.
  pub fn new<R: Rng>(keys: Vec<String>, params: SchedulerParams, rng: &mut R) -> Self {
    let correct = keys.iter().map(|k| (k.clone(), 0)).collect();
    let mut scheduler = Self {
      keys,
      params,
      queue: VecDeque::new(),
      correct,
      pending: HashSet::new(),
      presentation_failed: false,
    };
    scheduler.refill(rng);
    scheduler
  }

  /// Slot currently presented
  pub fn front(&self) -> Option<usize> {
    self.queue.front().copied()
  }

  /// Upcoming slots, front first
  pub fn queue(&self) -> &VecDeque<usize> {
    &self.queue
  }

  /// Flag the current presentation as failed without rescheduling it
  pub fn mark_failed(&mut self) {
    self.presentation_failed = true;
  }

  pub fn presentation_failed(&self) -> bool {
    self.presentation_failed
  }

  pub fn correct_count(&self, key: &str) -> u32 {
    self.correct.get(key).copied().unwrap_or(0)
  }

  pub fn is_pending(&self, key: &str) -> bool {
    self.pending.contains(key)
  }

  /// Consume the front word after a correct answer
  pub fn record_match<R: Rng>(&mut self, rng: &mut R) -> Credit {
    let Some(slot) = self.queue.pop_front() else {
      self.refill(rng);
      return Credit::Withheld;
    };
    let key = self.keys[slot].clone();

    let credit = if self.pending.remove(&key) {
      self.grant(&key);
      tracing::debug!("Awarded pending credit for {}: {}", key, self.correct_count(&key));
      Credit::MakeUp
    } else if !self.presentation_failed {
      self.grant(&key);
      tracing::debug!("Awarded credit for {}: {}", key, self.correct_count(&key));
      Credit::Immediate
    } else {
      tracing::debug!("No credit for {}, presentation already failed", key);
      Credit::Withheld
    };

    self.presentation_failed = false;
    self.refill(rng);
    credit
  }

  /// Reschedule the front word after a wrong submission
  pub fn record_miss<R: Rng>(&mut self, rng: &mut R) {
    let Some(slot) = self.front() else {
      self.refill(rng);
      return;
    };
    let key = self.keys[slot].clone();

    self.reinsert(slot);
    self.pending.insert(key.clone());
    tracing::debug!("Pending credit for {}, queued at {:?}", key, self.params.retry_offsets);

    self.presentation_failed = false;
    self.pad(rng);
  }

  /// Drop every copy of the slot's word and re-insert it at the retry offsets
  /// that fit the remaining queue.
  fn reinsert(&mut self, slot: usize) {
    let keys = &self.keys;
    let key = &keys[slot];
    self.queue.retain(|&s| keys[s] != *key);

    let len = self.queue.len();
    for &offset in &self.params.retry_offsets {
      if offset <= len {
        let at = offset.min(self.queue.len());
        self.queue.insert(at, slot);
      }
    }
  }

  /// Append random draws until the queue is back to its minimum length
  fn pad<R: Rng>(&mut self, rng: &mut R) {
    let target = self.params.queue_len.max(1);
    while self.queue.len() < target {
      let Some(slot) = self.draw(rng) else { return };
      self.queue.push_back(slot);
    }
  }

  /// Refill an exhausted queue with a full set of draws
  fn refill<R: Rng>(&mut self, rng: &mut R) {
    if self.queue.is_empty() {
      self.pad(rng);
    }
  }

  fn draw<R: Rng>(&self, rng: &mut R) -> Option<usize> {
    if self.keys.is_empty() {
      return None;
    }
    Some(rng.random_range(0..self.keys.len()))
  }

  fn grant(&mut self, key: &str) {
    *self.correct.entry(key.to_string()).or_insert(0) += 1;
  }

  /// Every word holds at least `required_correct` confirmed credits
  pub fn is_complete(&self) -> bool {
    self
      .keys
      .iter()
      .all(|k| self.correct_count(k) >= self.params.required_correct)
  }

  /// Credited answers toward completion and the total needed, counting each
  /// distinct word at most `required_correct` times.
  pub fn progress(&self) -> (usize, usize) {
    let required = self.params.required_correct;
    let done: u32 = self.correct.values().map(|&c| c.min(required)).sum();
    (done as usize, self.correct.len() * required as usize)
  }

  #[cfg(test)]
  pub(crate) fn set_queue(&mut self, slots: impl IntoIterator<Item = usize>) {
    self.queue = slots.into_iter().collect();
  }
}
