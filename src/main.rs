use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::rc::Rc;

use anyhow::Context;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vocab_drill::config::{self, DrillConfig};
use vocab_drill::content::{self, Deck, WordBatchSource};
use vocab_drill::error::OrWarn;
use vocab_drill::sinks::Sinks;
use vocab_drill::stats::{self, JsonlStatsLog, StatsRecorder};
use vocab_drill::terminal::{self, TerminalSink};
use vocab_drill::{paths, DrillError, Game};

const HELP: &str = "\
Type the answer and press Enter.
  :next      start the next round (once the current one is complete)
  :round N   jump to round N
  :help      show this help
  :quit      leave and show stats";

fn main() -> anyhow::Result<()> {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "vocab_drill=warn".into()),
    )
    .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
    .init();

  let config = config::load_config();
  let deck = select_deck(&config)?;
  tracing::info!(
    "Drilling deck '{}' ({} batches, {} words)",
    deck.name,
    deck.batches().len(),
    deck.word_count()
  );

  let stats_path = paths::stats_log_path();
  let recorder = Rc::new(RefCell::new(open_recorder(&config, Path::new(&stats_path))));
  let screen = Rc::new(RefCell::new(TerminalSink::stdout()));
  let sinks = Sinks::new(screen.clone(), screen, recorder.clone());

  let rng = match config.seed {
    Some(seed) => StdRng::seed_from_u64(seed),
    None => StdRng::from_os_rng(),
  };

  let mut game = Game::new(deck, config.round_config(), sinks, rng);
  println!("{}", HELP);
  game.start_round(1).context("Failed to start the first round")?;

  run(&mut game)?;

  recorder.borrow_mut().flush();
  println!("\nThis session: {}", recorder.borrow().tally());
  if config.record_stats {
    let history = stats::read_tally(Path::new(&stats_path));
    if let Some(lifetime) = history.or_warn("Failed to read stats history") {
      println!("All time:     {}", lifetime);
    }
  }
  Ok(())
}

/// Builtin deck for the standard modes, the configured deck file for custom ones
fn select_deck(config: &DrillConfig) -> anyhow::Result<Deck> {
  let deck = if config.mode.uses_custom_words() {
    let path = config
      .deck_path
      .as_deref()
      .context("Custom mode needs a deck: set [drill] deck in config.toml or DRILL_DECK")?;
    let path = paths::resolve_deck_path(path);
    content::load_deck(&path).map_err(|e| {
      tracing::error!("{}", e);
      anyhow::anyhow!("{}: {}", e.user_message(), path.display())
    })?
  } else {
    content::builtin_deck()
  };

  Ok(match config.practice_rounds {
    Some(enabled) => deck.with_practice_rounds(enabled),
    None => deck,
  })
}

fn open_recorder(config: &DrillConfig, path: &Path) -> StatsRecorder {
  if !config.record_stats {
    return StatsRecorder::new();
  }
  match JsonlStatsLog::open(path) {
    Ok(log) => StatsRecorder::with_log(log),
    Err(e) => {
      tracing::warn!("Stats history disabled, cannot open {}: {}", path.display(), e);
      StatsRecorder::new()
    }
  }
}

fn run<S: WordBatchSource>(game: &mut Game<S>) -> anyhow::Result<()> {
  let stdin = io::stdin();
  let mut lines = stdin.lock().lines();

  loop {
    print!("> ");
    io::stdout().flush()?;

    let Some(line) = lines.next() else {
      return Ok(());
    };
    let line = line?;
    let input = line.trim();

    match input {
      "" => continue,
      ":quit" | ":q" => return Ok(()),
      ":help" => println!("{}", HELP),
      ":next" => report(game.advance_to_next_round().map(|_| ())),
      _ if input.starts_with(":round") => {
        match input[":round".len()..].trim().parse::<u32>() {
          Ok(round) => report(game.start_round(round).map(|_| ())),
          Err(_) => println!("Usage: :round N (1..={})", game.max_round()),
        }
      }
      _ if input.starts_with(':') => println!("Unknown command, try :help"),
      _ => report(terminal::type_and_submit(game, input).map(|_| ())),
    }
  }
}

fn report(result: vocab_drill::Result<()>) {
  match result {
    Ok(()) => {}
    Err(DrillError::NoNextRound { .. }) => println!("That was the last round. Well done!"),
    Err(e) => println!("{}", e),
  }
}
