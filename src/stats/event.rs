//! Answer events recorded to the stats history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One answer outcome, written as a single JSONL line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerEvent {
    /// When the answer was given
    pub timestamp: DateTime<Utc>,
    /// Round the answer belongs to
    pub round: u32,
    pub correct: bool,
}

impl AnswerEvent {
    /// Create a new event with the current timestamp.
    pub fn new(round: u32, correct: bool) -> Self {
        Self {
            timestamp: Utc::now(),
            round,
            correct,
        }
    }
}
