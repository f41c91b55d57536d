use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;

use super::Word;
use crate::srs::SchedulerParams;

/// One-based round number. Odd rounds introduce a batch, even rounds practice
/// everything introduced so far (when practice rounds are enabled).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoundIndex(NonZeroU32);

impl RoundIndex {
  pub const FIRST: Self = Self(NonZeroU32::MIN);

  pub fn new(round: u32) -> Option<Self> {
    NonZeroU32::new(round).map(Self)
  }

  pub fn get(self) -> u32 {
    self.0.get()
  }

  pub fn next(self) -> Option<Self> {
    self.0.checked_add(1).map(Self)
  }

  pub fn is_odd(self) -> bool {
    self.get() % 2 == 1
  }
}

impl fmt::Display for RoundIndex {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Phase of a single round attempt. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
  /// Every word shown once with its answer
  Learning,
  /// Shuffled recall pass, each word retried in place until correct
  Elimination,
  /// Adaptive review queue until every word is confirmed enough times
  Repeating,
}

impl Phase {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Learning => "learning",
      Self::Elimination => "elimination",
      Self::Repeating => "repeating",
    }
  }
}

impl fmt::Display for Phase {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Which side of a word is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AnswerProjection {
  /// Show the source form, expect the translation
  #[default]
  Target,
  /// Show the translation, expect the source form
  Source,
}

impl AnswerProjection {
  pub fn prompt<'a>(&self, word: &'a Word) -> &'a str {
    match self {
      Self::Target => &word.source,
      Self::Source => &word.target,
    }
  }

  pub fn answer<'a>(&self, word: &'a Word) -> &'a str {
    match self {
      Self::Target => &word.target,
      Self::Source => &word.source,
    }
  }
}

/// Game mode picks the word source and the answer direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
  #[default]
  Standard,
  Custom,
  Mirrored,
  CustomMirrored,
}

impl GameMode {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Standard => "standard",
      Self::Custom => "custom",
      Self::Mirrored => "mirrored",
      Self::CustomMirrored => "custom-mirrored",
    }
  }

  pub fn from_str(s: &str) -> Option<Self> {
    match s.trim().to_lowercase().as_str() {
      "standard" => Some(Self::Standard),
      "custom" => Some(Self::Custom),
      "mirrored" => Some(Self::Mirrored),
      "custom-mirrored" | "custom_mirrored" => Some(Self::CustomMirrored),
      _ => None,
    }
  }

  pub fn projection(&self) -> AnswerProjection {
    match self {
      Self::Standard | Self::Custom => AnswerProjection::Target,
      Self::Mirrored | Self::CustomMirrored => AnswerProjection::Source,
    }
  }

  /// Custom modes drill a user-supplied deck instead of the bundled one.
  pub fn uses_custom_words(&self) -> bool {
    matches!(self, Self::Custom | Self::CustomMirrored)
  }
}

impl fmt::Display for GameMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Configuration handed to every round at start. Never read from global state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoundConfig {
  pub mode: GameMode,
  pub scheduler: SchedulerParams,
}

impl RoundConfig {
  pub fn new(mode: GameMode, scheduler: SchedulerParams) -> Self {
    Self { mode, scheduler }
  }

  pub fn projection(&self) -> AnswerProjection {
    self.mode.projection()
  }
}
