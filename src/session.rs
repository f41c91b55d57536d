//! Phase state machine for a single round attempt.
//!
//! A round moves Learning -> Elimination -> Repeating and never back. All of
//! its state is private to the attempt and dropped when another round starts.
//!
//! Input arrives as two kinds of events:
//! - `handle_input` for every change of the input field (live validation)
//! - `submit` for an explicit submission
//!
//! Live divergence only flags the presentation as failed. An explicit wrong
//! submission is also counted and, while repeating, reschedules the word.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::domain::{Phase, RoundConfig, RoundIndex, Word};
use crate::error::{DrillError, Result};
use crate::sinks::{Progress, Prompt, Sinks};
use crate::srs::{Credit, RepetitionScheduler};
use crate::validation::{classify, Verdict};

/// Engine response to an input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
  /// Correct prefix so far, nothing happened
  Typing,
  /// Answer accepted, the next presentation is already shown
  Correct(Credit),
  /// Answer rejected, the canonical answer was shown
  Wrong,
}

#[derive(Debug, Clone)]
enum PhaseState {
  Learning {
    index: usize,
    failed: bool,
  },
  Elimination {
    order: Vec<usize>,
    index: usize,
    failed: bool,
  },
  Repeating(RepetitionScheduler),
}

#[derive(Debug, Clone)]
pub struct RoundSession {
  round: RoundIndex,
  words: Vec<Word>,
  config: RoundConfig,
  state: PhaseState,
}

impl RoundSession {
  /// Enter Learning with the first word presented. An empty word set is a
  /// configuration error and no session is created.
  pub fn start(
    round: RoundIndex,
    words: Vec<Word>,
    config: RoundConfig,
    sinks: &mut Sinks,
  ) -> Result<Self> {
    if words.is_empty() {
      tracing::warn!("Refusing to start round {} without words", round);
      return Err(DrillError::EmptyRound { round: round.get() });
    }

    tracing::info!(
      "Round {} started with {} words in {} mode",
      round,
      words.len(),
      config.mode
    );

    let session = Self {
      round,
      words,
      config,
      state: PhaseState::Learning {
        index: 0,
        failed: false,
      },
    };
    sinks.progress.report_round_complete(false);
    session.present(sinks);
    Ok(session)
  }

  pub fn round(&self) -> RoundIndex {
    self.round
  }

  pub fn words(&self) -> &[Word] {
    &self.words
  }

  pub fn config(&self) -> &RoundConfig {
    &self.config
  }

  pub fn phase(&self) -> Phase {
    match self.state {
      PhaseState::Learning { .. } => Phase::Learning,
      PhaseState::Elimination { .. } => Phase::Elimination,
      PhaseState::Repeating(_) => Phase::Repeating,
    }
  }

  /// Review queue state, present once the round is repeating
  pub fn scheduler(&self) -> Option<&RepetitionScheduler> {
    match &self.state {
      PhaseState::Repeating(scheduler) => Some(scheduler),
      _ => None,
    }
  }

  /// Every word has its confirmed credits. Only unlocks the next round.
  pub fn is_complete(&self) -> bool {
    self.scheduler().is_some_and(RepetitionScheduler::is_complete)
  }

  fn current_slot(&self) -> Option<usize> {
    match &self.state {
      PhaseState::Learning { index, .. } => Some(*index),
      PhaseState::Elimination { order, index, .. } => order.get(*index).copied(),
      PhaseState::Repeating(scheduler) => scheduler.front(),
    }
  }

  pub fn current_word(&self) -> Option<&Word> {
    self.current_slot().and_then(|slot| self.words.get(slot))
  }

  pub fn current_prompt(&self) -> Option<&str> {
    let projection = self.config.projection();
    self.current_word().map(|w| projection.prompt(w))
  }

  pub fn current_answer(&self) -> Option<&str> {
    let projection = self.config.projection();
    self.current_word().map(|w| projection.answer(w))
  }

  pub fn presentation_failed(&self) -> bool {
    match &self.state {
      PhaseState::Learning { failed, .. } | PhaseState::Elimination { failed, .. } => *failed,
      PhaseState::Repeating(scheduler) => scheduler.presentation_failed(),
    }
  }

  pub fn progress(&self) -> Progress {
    let len = self.words.len();
    match &self.state {
      PhaseState::Learning { index, .. } => Progress {
        phase: Phase::Learning,
        position: (index + 1).min(len),
        total: len,
      },
      PhaseState::Elimination { index, .. } => Progress {
        phase: Phase::Elimination,
        position: (index + 1).min(len),
        total: len,
      },
      PhaseState::Repeating(scheduler) => {
        let (done, total) = scheduler.progress();
        Progress {
          phase: Phase::Repeating,
          position: done,
          total,
        }
      }
    }
  }

  /// Live check of the input field after every change
  pub fn handle_input<R: Rng>(&mut self, input: &str, rng: &mut R, sinks: &mut Sinks) -> Feedback {
    let Some(answer) = self.current_answer().map(str::to_owned) else {
      return Feedback::Typing;
    };

    match classify(input, &answer) {
      Verdict::InProgress => Feedback::Typing,
      Verdict::Match => self.accept(rng, sinks),
      Verdict::Diverging => {
        self.fail_presentation(&answer, sinks);
        Feedback::Wrong
      }
    }
  }

  /// Explicit submission: anything but a match is a wrong answer
  pub fn submit<R: Rng>(&mut self, input: &str, rng: &mut R, sinks: &mut Sinks) -> Feedback {
    let Some(answer) = self.current_answer().map(str::to_owned) else {
      return Feedback::Typing;
    };

    if classify(input, &answer).is_match() {
      self.accept(rng, sinks)
    } else {
      self.reject(&answer, rng, sinks)
    }
  }

  fn fail_presentation(&mut self, answer: &str, sinks: &mut Sinks) {
    sinks.presentation.show_failure(answer);
    sinks.presentation.clear_input();
    match &mut self.state {
      PhaseState::Learning { failed, .. } | PhaseState::Elimination { failed, .. } => {
        *failed = true
      }
      PhaseState::Repeating(scheduler) => scheduler.mark_failed(),
    }
  }

  fn reject<R: Rng>(&mut self, answer: &str, rng: &mut R, sinks: &mut Sinks) -> Feedback {
    self.fail_presentation(answer, sinks);

    match &mut self.state {
      // Learning only shows the answer again
      PhaseState::Learning { .. } => {}
      // Retried in place until correct
      PhaseState::Elimination { .. } => sinks.stats.report_answer(false, self.round),
      PhaseState::Repeating(scheduler) => {
        sinks.stats.report_answer(false, self.round);
        scheduler.record_miss(rng);
        sinks.progress.report_round_complete(scheduler.is_complete());
      }
    }

    if matches!(self.state, PhaseState::Repeating(_)) {
      self.present(sinks);
    }
    Feedback::Wrong
  }

  fn accept<R: Rng>(&mut self, rng: &mut R, sinks: &mut Sinks) -> Feedback {
    let len = self.words.len();

    let (credit, finished) = match &mut self.state {
      PhaseState::Learning { index, failed } => {
        *index += 1;
        *failed = false;
        (Credit::Unscored, *index >= len)
      }
      PhaseState::Elimination {
        order,
        index,
        failed,
      } => {
        sinks.stats.report_answer(true, self.round);
        *index += 1;
        *failed = false;
        (Credit::Unscored, *index >= order.len())
      }
      PhaseState::Repeating(scheduler) => {
        sinks.stats.report_answer(true, self.round);
        let credit = scheduler.record_match(rng);
        sinks.progress.report_round_complete(scheduler.is_complete());
        (credit, false)
      }
    };

    if finished {
      self.advance_phase(rng, sinks);
    }
    self.present(sinks);
    Feedback::Correct(credit)
  }

  fn advance_phase<R: Rng>(&mut self, rng: &mut R, sinks: &mut Sinks) {
    let next = match &self.state {
      PhaseState::Learning { .. } => {
        let mut order: Vec<usize> = (0..self.words.len()).collect();
        order.shuffle(rng);
        tracing::info!("Round {} entering elimination", self.round);
        PhaseState::Elimination {
          order,
          index: 0,
          failed: false,
        }
      }
      PhaseState::Elimination { .. } => {
        let keys = self.words.iter().map(|w| w.key().to_string()).collect();
        let scheduler = RepetitionScheduler::new(keys, self.config.scheduler.clone(), rng);
        tracing::info!("Round {} entering repeating", self.round);
        sinks.progress.report_round_complete(scheduler.is_complete());
        PhaseState::Repeating(scheduler)
      }
      PhaseState::Repeating(_) => return,
    };
    self.state = next;
  }

  fn present(&self, sinks: &mut Sinks) {
    let Some(word) = self.current_word() else {
      return;
    };
    let projection = self.config.projection();
    let reveal = matches!(self.state, PhaseState::Learning { .. });

    sinks.presentation.show_prompt(&Prompt {
      round: self.round,
      phase: self.phase(),
      text: projection.prompt(word),
      answer: reveal.then(|| projection.answer(word)),
    });
    sinks.presentation.clear_input();
    sinks.progress.report_progress(self.progress());
  }

  #[cfg(test)]
  pub(crate) fn scheduler_mut(&mut self) -> Option<&mut RepetitionScheduler> {
    match &mut self.state {
      PhaseState::Repeating(scheduler) => Some(scheduler),
      _ => None,
    }
  }
}
