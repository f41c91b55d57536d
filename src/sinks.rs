//! Boundary traits the engine reports through.
//!
//! Rendering, progress display and stats storage live outside the engine; it
//! only calls these sinks, synchronously, once per event.

use std::cell::RefCell;
use std::rc::Rc;

use crate::domain::{Phase, RoundIndex};

/// A word being presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prompt<'a> {
  pub round: RoundIndex,
  pub phase: Phase,
  pub text: &'a str,
  /// Present only while learning, when the answer is shown with the prompt
  pub answer: Option<&'a str>,
}

/// Progress within the current phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
  pub phase: Phase,
  /// One-based position while learning or eliminating, credited answers while repeating
  pub position: usize,
  pub total: usize,
}

pub trait PresentationSink {
  fn show_prompt(&mut self, prompt: &Prompt<'_>);
  fn show_failure(&mut self, answer: &str);
  fn clear_input(&mut self);
}

pub trait ProgressSink {
  fn report_progress(&mut self, progress: Progress);
  /// Drives the "proceed to next round" affordance
  fn report_round_complete(&mut self, complete: bool);
  fn report_round_started(&mut self, _round: RoundIndex, _title: &str) {}
}

pub trait StatsSink {
  /// One call per answer outcome, independent of credit bookkeeping
  fn report_answer(&mut self, correct: bool, round: RoundIndex);
}

/// Sink that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl PresentationSink for NoopSink {
  fn show_prompt(&mut self, _: &Prompt<'_>) {}
  fn show_failure(&mut self, _: &str) {}
  fn clear_input(&mut self) {}
}

impl ProgressSink for NoopSink {
  fn report_progress(&mut self, _: Progress) {}
  fn report_round_complete(&mut self, _: bool) {}
}

impl StatsSink for NoopSink {
  fn report_answer(&mut self, _: bool, _: RoundIndex) {}
}

// Shared handles let a caller keep reading a sink it handed to the engine.

impl<T: PresentationSink + ?Sized> PresentationSink for Rc<RefCell<T>> {
  fn show_prompt(&mut self, prompt: &Prompt<'_>) {
    self.borrow_mut().show_prompt(prompt);
  }

  fn show_failure(&mut self, answer: &str) {
    self.borrow_mut().show_failure(answer);
  }

  fn clear_input(&mut self) {
    self.borrow_mut().clear_input();
  }
}

impl<T: ProgressSink + ?Sized> ProgressSink for Rc<RefCell<T>> {
  fn report_progress(&mut self, progress: Progress) {
    self.borrow_mut().report_progress(progress);
  }

  fn report_round_complete(&mut self, complete: bool) {
    self.borrow_mut().report_round_complete(complete);
  }

  fn report_round_started(&mut self, round: RoundIndex, title: &str) {
    self.borrow_mut().report_round_started(round, title);
  }
}

impl<T: StatsSink + ?Sized> StatsSink for Rc<RefCell<T>> {
  fn report_answer(&mut self, correct: bool, round: RoundIndex) {
    self.borrow_mut().report_answer(correct, round);
  }
}

/// The three sinks an engine reports to
pub struct Sinks {
  pub presentation: Box<dyn PresentationSink>,
  pub progress: Box<dyn ProgressSink>,
  pub stats: Box<dyn StatsSink>,
}

impl Sinks {
  pub fn new(
    presentation: impl PresentationSink + 'static,
    progress: impl ProgressSink + 'static,
    stats: impl StatsSink + 'static,
  ) -> Self {
    Self {
      presentation: Box::new(presentation),
      progress: Box::new(progress),
      stats: Box::new(stats),
    }
  }

  pub fn silent() -> Self {
    Self::new(NoopSink, NoopSink, NoopSink)
  }
}

impl Default for Sinks {
  fn default() -> Self {
    Self::silent()
  }
}

impl std::fmt::Debug for Sinks {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Sinks").finish_non_exhaustive()
  }
}
