//! Error types for round control.

use thiserror::Error;

/// Result type alias using DrillError.
pub type Result<T> = std::result::Result<T, DrillError>;

/// Errors surfaced to the caller of round-control operations.
///
/// Wrong answers are never errors; they are ordinary feedback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrillError {
  #[error("round {round} is outside 1..={max}")]
  RoundOutOfRange { round: u32, max: u32 },

  #[error("round {round} has no words")]
  EmptyRound { round: u32 },

  #[error("round {round} is not complete yet")]
  RoundIncomplete { round: u32 },

  #[error("no round follows round {round}")]
  NoNextRound { round: u32 },

  #[error("no round has been started")]
  NotStarted,
}

/// Log a failed non-critical step and carry on
pub trait OrWarn<T> {
  /// `Some` on success; on failure a warning prefixed with `context` and `None`
  fn or_warn(self, context: &str) -> Option<T>;
}

impl<T, E: std::fmt::Display> OrWarn<T> for std::result::Result<T, E> {
  fn or_warn(self, context: &str) -> Option<T> {
    self.map_err(|e| tracing::warn!("{}: {}", context, e)).ok()
  }
}
