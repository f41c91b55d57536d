//! Shared helpers for driving whole games through the public API.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::StdRng;

use vocab_drill::content::{Deck, WordBatchSource};
use vocab_drill::domain::{RoundConfig, RoundIndex};
use vocab_drill::sinks::{NoopSink, Progress, ProgressSink, Sinks};
use vocab_drill::stats::StatsRecorder;
use vocab_drill::terminal::type_and_submit;
use vocab_drill::Game;

/// Round titles and completion flags seen by the progress sink
#[derive(Debug, Default)]
pub struct RoundLog {
    pub titles: Vec<String>,
    pub completions: Vec<bool>,
}

impl ProgressSink for RoundLog {
    fn report_progress(&mut self, _: Progress) {}

    fn report_round_complete(&mut self, complete: bool) {
        self.completions.push(complete);
    }

    fn report_round_started(&mut self, _: RoundIndex, title: &str) {
        self.titles.push(title.to_string());
    }
}

pub struct Harness {
    pub game: Game<Deck>,
    pub rounds: Rc<RefCell<RoundLog>>,
    pub stats: Rc<RefCell<StatsRecorder>>,
}

/// A seeded game over `deck` with stats and round reporting captured
pub fn harness(deck: Deck, config: RoundConfig) -> Harness {
    let rounds = Rc::new(RefCell::new(RoundLog::default()));
    let stats = Rc::new(RefCell::new(StatsRecorder::new()));
    let sinks = Sinks::new(NoopSink, rounds.clone(), stats.clone());
    let game = Game::new(deck, config, sinks, StdRng::seed_from_u64(2024));
    Harness {
        game,
        rounds,
        stats,
    }
}

/// Type the expected answer until the current round completes
pub fn play_round<S: WordBatchSource>(game: &mut Game<S>) {
    for _ in 0..1000 {
        if game.is_round_complete() {
            return;
        }
        let answer = game
            .session()
            .and_then(|s| s.current_answer())
            .expect("round in progress")
            .to_string();
        type_and_submit(game, &answer).expect("round started");
    }
    panic!("round never completed");
}
