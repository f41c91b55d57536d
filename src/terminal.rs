//! Line-mode terminal front end.
//!
//! A typed line stands in for the input field: each prefix is fed as a live
//! input change, then Enter submits whatever the field still holds. A live
//! divergence clears the field, so Enter then submits an empty answer.

use std::io::{self, Stdout, Write};

use rand::Rng;

use crate::content::WordBatchSource;
use crate::domain::{Phase, RoundIndex};
use crate::error::{OrWarn, Result};
use crate::game::Game;
use crate::session::Feedback;
use crate::sinks::{PresentationSink, Progress, ProgressSink, Prompt};

/// Renders presentations and progress as plain text lines
#[derive(Debug)]
pub struct TerminalSink<W: Write> {
  out: W,
  /// Last completion state reported, so the banner prints once per round
  complete: bool,
}

impl TerminalSink<Stdout> {
  pub fn stdout() -> Self {
    Self::new(io::stdout())
  }
}

impl<W: Write> TerminalSink<W> {
  pub fn new(out: W) -> Self {
    Self {
      out,
      complete: false,
    }
  }

  pub fn into_inner(self) -> W {
    self.out
  }

  fn line(&mut self, text: std::fmt::Arguments<'_>) {
    writeln!(self.out, "{}", text).or_warn("Failed to write to terminal");
  }
}

impl<W: Write> PresentationSink for TerminalSink<W> {
  fn show_prompt(&mut self, prompt: &Prompt<'_>) {
    match prompt.answer {
      Some(answer) => self.line(format_args!("[{}] {}  =  {}", prompt.phase, prompt.text, answer)),
      None => self.line(format_args!("[{}] {}", prompt.phase, prompt.text)),
    }
  }

  fn show_failure(&mut self, answer: &str) {
    self.line(format_args!("  x  {}", answer));
  }

  fn clear_input(&mut self) {
    // Each line is read fresh, there is no field to clear
    self.out.flush().or_warn("Failed to flush terminal");
  }
}

impl<W: Write> ProgressSink for TerminalSink<W> {
  fn report_progress(&mut self, progress: Progress) {
    let label = match progress.phase {
      Phase::Repeating => "learned",
      Phase::Learning | Phase::Elimination => "word",
    };
    self.line(format_args!("  ({} {}/{})", label, progress.position, progress.total));
  }

  fn report_round_complete(&mut self, complete: bool) {
    if complete && !self.complete {
      self.line(format_args!("Round complete! Type :next for the next round."));
    }
    self.complete = complete;
  }

  fn report_round_started(&mut self, round: RoundIndex, title: &str) {
    self.complete = false;
    self.line(format_args!("\n=== {} (round {}) ===", title, round));
  }
}

/// Feed `line` as if typed character by character, then press Enter.
pub fn type_and_submit<S: WordBatchSource, R: Rng>(
  game: &mut Game<S, R>,
  line: &str,
) -> Result<Feedback> {
  let mut typed = String::with_capacity(line.len());
  for ch in line.chars() {
    typed.push(ch);
    match game.handle_input(&typed)? {
      Feedback::Typing => {}
      // Field was cleared; the rest of the line is lost
      Feedback::Wrong => return game.submit(""),
      accepted @ Feedback::Correct(_) => return Ok(accepted),
    }
  }
  game.submit(line)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::content::Deck;
  use crate::domain::{RoundConfig, Word, WordBatch};
  use crate::error::DrillError;
  use crate::sinks::Sinks;
  use crate::srs::Credit;
  use crate::testing::{recording_sinks, Event};
  use rand::SeedableRng;
  use rand::rngs::StdRng;

  fn rendered(sink: TerminalSink<Vec<u8>>) -> String {
    String::from_utf8(sink.into_inner()).unwrap()
  }

  fn game() -> Game<Deck> {
    let deck = Deck::new(
      "pair",
      vec![WordBatch::new(vec![Word::new("いぬ", "dog"), Word::new("ねこ", "cat")])],
    );
    Game::new(deck, RoundConfig::default(), Sinks::silent(), StdRng::seed_from_u64(3))
  }

  #[test]
  fn test_learning_prompt_shows_answer() {
    let mut sink = TerminalSink::new(Vec::new());
    sink.show_prompt(&Prompt {
      round: RoundIndex::FIRST,
      phase: Phase::Learning,
      text: "いぬ",
      answer: Some("dog"),
    });
    sink.show_prompt(&Prompt {
      round: RoundIndex::FIRST,
      phase: Phase::Elimination,
      text: "ねこ",
      answer: None,
    });
    sink.show_failure("cat");
    assert_eq!(
      rendered(sink),
      "[learning] いぬ  =  dog\n[elimination] ねこ\n  x  cat\n"
    );
  }

  #[test]
  fn test_completion_banner_prints_once() {
    let mut sink = TerminalSink::new(Vec::new());
    sink.report_round_complete(false);
    sink.report_round_complete(true);
    sink.report_round_complete(true);
    let out = rendered(sink);
    assert_eq!(out.matches("Round complete!").count(), 1);
  }

  #[test]
  fn test_round_start_resets_banner() {
    let mut sink = TerminalSink::new(Vec::new());
    sink.report_round_complete(true);
    sink.report_round_started(RoundIndex::new(2).unwrap(), "Practice Round 1");
    sink.report_round_complete(true);
    let out = rendered(sink);
    assert!(out.contains("=== Practice Round 1 (round 2) ==="));
    assert_eq!(out.matches("Round complete!").count(), 2);
  }

  #[test]
  fn test_progress_line() {
    let mut sink = TerminalSink::new(Vec::new());
    sink.report_progress(Progress {
      phase: Phase::Repeating,
      position: 4,
      total: 6,
    });
    assert_eq!(rendered(sink), "  (learned 4/6)\n");
  }

  #[test]
  fn test_type_and_submit_before_start() {
    let mut game = game();
    assert_eq!(type_and_submit(&mut game, "dog"), Err(DrillError::NotStarted));
  }

  #[test]
  fn test_type_and_submit_correct_line() {
    let mut game = game();
    game.start_round(1).unwrap();
    let answer = game.session().unwrap().current_answer().unwrap().to_string();
    assert_eq!(
      type_and_submit(&mut game, &answer),
      Ok(Feedback::Correct(Credit::Unscored))
    );
  }

  #[test]
  fn test_type_and_submit_diverging_line() {
    let mut game = game();
    game.start_round(1).unwrap();
    assert_eq!(type_and_submit(&mut game, "zebra"), Ok(Feedback::Wrong));
  }

  #[test]
  fn test_diverging_line_still_submits_on_enter() {
    let (sinks, log) = recording_sinks();
    let deck = Deck::new(
      "pair",
      vec![WordBatch::new(vec![Word::new("いぬ", "dog"), Word::new("ねこ", "cat")])],
    );
    let mut game = Game::new(deck, RoundConfig::default(), sinks, StdRng::seed_from_u64(3));
    game.start_round(1).unwrap();

    // Through learning into elimination
    for _ in 0..2 {
      let answer = game.session().unwrap().current_answer().unwrap().to_string();
      type_and_submit(&mut game, &answer).unwrap();
    }
    let expected = game.session().unwrap().current_answer().unwrap().to_string();
    log.borrow_mut().events.clear();

    assert_eq!(type_and_submit(&mut game, "zebra"), Ok(Feedback::Wrong));

    let log = log.borrow();
    assert_eq!(log.answers(), vec![false]);
    // Once for the divergence, once for the submission
    assert_eq!(log.failures(), vec![expected.clone(), expected]);
    assert!(log.events.contains(&Event::ClearInput));
  }

  #[test]
  fn test_type_and_submit_short_line() {
    let mut game = game();
    game.start_round(1).unwrap();
    let answer = game.session().unwrap().current_answer().unwrap().to_string();
    let prefix: String = answer.chars().take(1).collect();
    // Never diverged, never matched: the explicit submit decides
    assert_eq!(type_and_submit(&mut game, &prefix), Ok(Feedback::Wrong));
  }
}
