//! Test utilities for observing the engine.
//!
//! Provides a recorder that captures every sink call in order, so tests can
//! assert on what a front end would have been told.

use std::cell::RefCell;
use std::rc::Rc;

use crate::domain::RoundIndex;
use crate::sinks::{PresentationSink, Progress, ProgressSink, Prompt, Sinks, StatsSink};

/// One recorded sink call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Prompt { text: String, answer: Option<String> },
    Failure(String),
    ClearInput,
    Progress(Progress),
    RoundComplete(bool),
    RoundStarted { round: u32, title: String },
    Answer { correct: bool, round: u32 },
}

#[derive(Debug, Default)]
pub struct Recorder {
    pub events: Vec<Event>,
}

impl Recorder {
    /// Prompts shown so far as (text, revealed answer)
    pub fn prompts(&self) -> Vec<(String, Option<String>)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Prompt { text, answer } => Some((text.clone(), answer.clone())),
                _ => None,
            })
            .collect()
    }

    /// Answer outcomes reported to the stats sink
    pub fn answers(&self) -> Vec<bool> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Answer { correct, .. } => Some(*correct),
                _ => None,
            })
            .collect()
    }

    pub fn failures(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Failure(answer) => Some(answer.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn last_completion(&self) -> Option<bool> {
        self.events.iter().rev().find_map(|e| match e {
            Event::RoundComplete(complete) => Some(*complete),
            _ => None,
        })
    }
}

impl PresentationSink for Recorder {
    fn show_prompt(&mut self, prompt: &Prompt<'_>) {
        self.events.push(Event::Prompt {
            text: prompt.text.to_string(),
            answer: prompt.answer.map(str::to_string),
        });
    }

    fn show_failure(&mut self, answer: &str) {
        self.events.push(Event::Failure(answer.to_string()));
    }

    fn clear_input(&mut self) {
        self.events.push(Event::ClearInput);
    }
}

impl ProgressSink for Recorder {
    fn report_progress(&mut self, progress: Progress) {
        self.events.push(Event::Progress(progress));
    }

    fn report_round_complete(&mut self, complete: bool) {
        self.events.push(Event::RoundComplete(complete));
    }

    fn report_round_started(&mut self, round: RoundIndex, title: &str) {
        self.events.push(Event::RoundStarted {
            round: round.get(),
            title: title.to_string(),
        });
    }
}

impl StatsSink for Recorder {
    fn report_answer(&mut self, correct: bool, round: RoundIndex) {
        self.events.push(Event::Answer {
            correct,
            round: round.get(),
        });
    }
}

/// Sinks that all feed one shared recorder
pub fn recording_sinks() -> (Sinks, Rc<RefCell<Recorder>>) {
    let recorder = Rc::new(RefCell::new(Recorder::default()));
    let sinks = Sinks::new(recorder.clone(), recorder.clone(), recorder.clone());
    (sinks, recorder)
}
