//! Round control: starting rounds, moving to the next one, routing input.
//!
//! Every round start builds a fresh `RoundSession`, so jumping to any round
//! discards the previous attempt's queue and counters without merging them.

use rand::Rng;
use rand::rngs::StdRng;

use crate::content::WordBatchSource;
use crate::domain::{RoundConfig, RoundIndex};
use crate::error::{DrillError, Result};
use crate::session::{Feedback, RoundSession};
use crate::sinks::Sinks;
use crate::srs::RoundTopology;

pub struct Game<S, R = StdRng> {
  source: S,
  config: RoundConfig,
  sinks: Sinks,
  rng: R,
  session: Option<RoundSession>,
}

impl<S: WordBatchSource, R: Rng> Game<S, R> {
  /// A game with no round started yet
  pub fn new(source: S, config: RoundConfig, sinks: Sinks, rng: R) -> Self {
    Self {
      source,
      config,
      sinks,
      rng,
      session: None,
    }
  }

  pub fn topology(&self) -> RoundTopology {
    RoundTopology::new(self.source.practice_rounds_enabled())
  }

  pub fn max_round(&self) -> u32 {
    self.topology().max_round_index(self.source.batches().len())
  }

  pub fn session(&self) -> Option<&RoundSession> {
    self.session.as_ref()
  }

  pub fn current_round(&self) -> Option<RoundIndex> {
    self.session.as_ref().map(RoundSession::round)
  }

  pub fn is_round_complete(&self) -> bool {
    self.session.as_ref().is_some_and(RoundSession::is_complete)
  }

  /// Start (or restart) a round by number. On error the current state is kept.
  pub fn start_round(&mut self, round: u32) -> Result<RoundIndex> {
    let topology = self.topology();
    let batches = self.source.batches();
    let round = topology.resolve(round, batches.len())?;
    let words = topology.words_for_round(round, batches);

    if words.is_empty() {
      tracing::warn!("Round {} resolved to no words", round);
      return Err(DrillError::EmptyRound { round: round.get() });
    }

    let title = topology.title(round);
    self.sinks.progress.report_round_started(round, &title);
    let session = RoundSession::start(round, words, self.config.clone(), &mut self.sinks)?;
    if let Some(previous) = self.session.replace(session) {
      tracing::debug!("Discarded attempt at round {}", previous.round());
    }
    Ok(round)
  }

  /// Move on once the current round is complete
  pub fn advance_to_next_round(&mut self) -> Result<RoundIndex> {
    let session = self.session.as_ref().ok_or(DrillError::NotStarted)?;
    let round = session.round();

    if !session.is_complete() {
      return Err(DrillError::RoundIncomplete { round: round.get() });
    }

    let next = round
      .next()
      .filter(|next| next.get() <= self.max_round())
      .ok_or(DrillError::NoNextRound { round: round.get() })?;
    self.start_round(next.get())
  }

  /// Live input change for the current presentation
  pub fn handle_input(&mut self, input: &str) -> Result<Feedback> {
    let session = self.session.as_mut().ok_or(DrillError::NotStarted)?;
    Ok(session.handle_input(input, &mut self.rng, &mut self.sinks))
  }

  /// Explicit submission for the current presentation
  pub fn submit(&mut self, input: &str) -> Result<Feedback> {
    let session = self.session.as_mut().ok_or(DrillError::NotStarted)?;
    Ok(session.submit(input, &mut self.rng, &mut self.sinks))
  }
}
