//! Answer statistics: a running tally plus an optional JSONL history.
//!
//! The engine reports every counted answer through `StatsSink`; the recorder
//! tallies it for the current run and appends it to the history file.

mod event;
mod logger;

pub use event::AnswerEvent;
pub use logger::JsonlStatsLog;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::domain::RoundIndex;
use crate::error::OrWarn;
use crate::sinks::StatsSink;

/// Correct and incorrect answer counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsTally {
    pub correct: u64,
    pub incorrect: u64,
}

impl StatsTally {
    pub fn record(&mut self, correct: bool) {
        if correct {
            self.correct += 1;
        } else {
            self.incorrect += 1;
        }
    }

    pub fn total(&self) -> u64 {
        self.correct + self.incorrect
    }

    /// Share of correct answers in percent, 0 when nothing was answered
    pub fn accuracy(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.correct as f64 * 100.0 / self.total() as f64
        }
    }
}

impl std::fmt::Display for StatsTally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} correct, {} incorrect ({:.0}%)",
            self.correct,
            self.incorrect,
            self.accuracy()
        )
    }
}

/// Stats sink that tallies answers and optionally appends them to a log.
#[derive(Debug, Default)]
pub struct StatsRecorder {
    tally: StatsTally,
    log: Option<JsonlStatsLog>,
}

impl StatsRecorder {
    /// Tally in memory only
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally and append every answer to `log`
    pub fn with_log(log: JsonlStatsLog) -> Self {
        Self {
            tally: StatsTally::default(),
            log: Some(log),
        }
    }

    pub fn tally(&self) -> StatsTally {
        self.tally
    }

    pub fn flush(&mut self) {
        if let Some(log) = self.log.as_mut() {
            log.flush().or_warn("Failed to flush stats log");
        }
    }
}

impl StatsSink for StatsRecorder {
    fn report_answer(&mut self, correct: bool, round: RoundIndex) {
        self.tally.record(correct);
        if let Some(log) = self.log.as_mut() {
            log.log(&AnswerEvent::new(round.get(), correct))
                .or_warn("Failed to record answer");
        }
    }
}

/// Fold a JSONL answer history into a tally.
///
/// A missing file is an empty history. Malformed lines are skipped.
pub fn read_tally(path: &Path) -> std::io::Result<StatsTally> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(StatsTally::default()),
        Err(e) => return Err(e),
    };

    let mut tally = StatsTally::default();
    for (number, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<AnswerEvent>(&line) {
            Ok(event) => tally.record(event.correct),
            Err(e) => tracing::warn!(
                "Skipping malformed line {} in {}: {}",
                number + 1,
                path.display(),
                e
            ),
        }
    }
    Ok(tally)
}
