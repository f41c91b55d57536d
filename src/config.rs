//! Application configuration constants and layered drill settings.
//!
//! Settings resolve with priority: config.toml > environment (.env) > default.

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::{GameMode, RoundConfig};
use crate::srs::SchedulerParams;

// ==================== Review Queue ====================

/// Initial length of the Repeating queue and its floor after a miss
pub const REVIEW_QUEUE_LEN: usize = 21;

/// Queue positions a missed word is re-inserted at
pub const RETRY_OFFSETS: [usize; 2] = [5, 10];

/// Credits each word needs before a round is complete
pub const REQUIRED_CORRECT: u32 = 3;

// ==================== Config File ====================

/// Config file looked up in the working directory
pub const CONFIG_FILE: &str = "config.toml";

pub const ENV_MODE: &str = "DRILL_MODE";
pub const ENV_DECK: &str = "DRILL_DECK";
pub const ENV_PRACTICE_ROUNDS: &str = "DRILL_PRACTICE_ROUNDS";
pub const ENV_SEED: &str = "DRILL_SEED";
pub const ENV_RECORD_STATS: &str = "DRILL_RECORD_STATS";

/// Resolved drill settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrillConfig {
    pub mode: GameMode,
    /// Deck file for the custom modes
    pub deck_path: Option<PathBuf>,
    /// Overrides the deck's own practice-round flag when set
    pub practice_rounds: Option<bool>,
    /// Fixed RNG seed for reproducible queues
    pub seed: Option<u64>,
    pub record_stats: bool,
    pub scheduler: SchedulerParams,
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::Standard,
            deck_path: None,
            practice_rounds: None,
            seed: None,
            record_stats: true,
            scheduler: SchedulerParams::default(),
        }
    }
}

impl DrillConfig {
    /// Per-round settings handed to the engine
    pub fn round_config(&self) -> RoundConfig {
        RoundConfig::new(self.mode, self.scheduler.clone())
    }
}

/// Configuration file structure for config.toml
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    drill: Option<DrillSection>,
    scheduler: Option<SchedulerSection>,
}

#[derive(Debug, Default, Deserialize)]
struct DrillSection {
    mode: Option<String>,
    deck: Option<String>,
    practice_rounds: Option<bool>,
    seed: Option<u64>,
    record_stats: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct SchedulerSection {
    queue_len: Option<usize>,
    retry_offsets: Option<Vec<usize>>,
    required_correct: Option<u32>,
}

/// Parse the contents of a config.toml
pub fn parse_config(contents: &str) -> Result<ConfigFile, toml::de::Error> {
    toml::from_str(contents)
}

/// Load drill settings with priority: config.toml > .env > default
pub fn load_config() -> DrillConfig {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let file = match std::fs::read_to_string(CONFIG_FILE) {
        Ok(contents) => match parse_config(&contents) {
            Ok(file) => Some(file),
            Err(e) => {
                tracing::warn!("Ignoring malformed {}: {}", CONFIG_FILE, e);
                None
            }
        },
        Err(_) => None,
    };

    build_config(file, |key| std::env::var(key).ok())
}

/// Layer defaults, then environment, then file values
pub fn build_config(
    file: Option<ConfigFile>,
    lookup: impl Fn(&str) -> Option<String>,
) -> DrillConfig {
    let mut config = DrillConfig::default();
    apply_env(&mut config, &lookup);
    if let Some(file) = file {
        apply_file(&mut config, file);
    }
    config.scheduler = sanitize_scheduler(config.scheduler);
    tracing::info!("Using mode: {}", config.mode);
    config
}

fn apply_env(config: &mut DrillConfig, lookup: &impl Fn(&str) -> Option<String>) {
    if let Some(value) = lookup(ENV_MODE) {
        match GameMode::from_str(&value) {
            Some(mode) => {
                tracing::info!("Using mode from {} env: {}", ENV_MODE, mode);
                config.mode = mode;
            }
            None => tracing::warn!("Unknown {} value '{}', keeping {}", ENV_MODE, value, config.mode),
        }
    }

    if let Some(path) = lookup(ENV_DECK) {
        tracing::info!("Using deck from {} env: {}", ENV_DECK, path);
        config.deck_path = Some(PathBuf::from(path));
    }

    if let Some(value) = lookup(ENV_PRACTICE_ROUNDS) {
        match parse_bool(&value) {
            Some(enabled) => config.practice_rounds = Some(enabled),
            None => tracing::warn!("Ignoring invalid {} value '{}'", ENV_PRACTICE_ROUNDS, value),
        }
    }

    if let Some(value) = lookup(ENV_SEED) {
        match value.trim().parse::<u64>() {
            Ok(seed) => config.seed = Some(seed),
            Err(_) => tracing::warn!("Ignoring invalid {} value '{}'", ENV_SEED, value),
        }
    }

    if let Some(value) = lookup(ENV_RECORD_STATS) {
        match parse_bool(&value) {
            Some(enabled) => config.record_stats = enabled,
            None => tracing::warn!("Ignoring invalid {} value '{}'", ENV_RECORD_STATS, value),
        }
    }
}

fn apply_file(config: &mut DrillConfig, file: ConfigFile) {
    if let Some(drill) = file.drill {
        if let Some(value) = drill.mode {
            match GameMode::from_str(&value) {
                Some(mode) => {
                    tracing::info!("Using mode from {}: {}", CONFIG_FILE, mode);
                    config.mode = mode;
                }
                None => tracing::warn!("Unknown mode '{}' in {}", value, CONFIG_FILE),
            }
        }
        if let Some(path) = drill.deck {
            tracing::info!("Using deck from {}: {}", CONFIG_FILE, path);
            config.deck_path = Some(PathBuf::from(path));
        }
        if drill.practice_rounds.is_some() {
            config.practice_rounds = drill.practice_rounds;
        }
        if drill.seed.is_some() {
            config.seed = drill.seed;
        }
        if let Some(enabled) = drill.record_stats {
            config.record_stats = enabled;
        }
    }

    if let Some(scheduler) = file.scheduler {
        if let Some(len) = scheduler.queue_len {
            config.scheduler.queue_len = len;
        }
        if let Some(offsets) = scheduler.retry_offsets {
            config.scheduler.retry_offsets = offsets;
        }
        if let Some(required) = scheduler.required_correct {
            config.scheduler.required_correct = required;
        }
    }
}

/// Replace unusable scheduler values with defaults
fn sanitize_scheduler(mut params: SchedulerParams) -> SchedulerParams {
    let defaults = SchedulerParams::default();
    if params.queue_len == 0 {
        tracing::warn!("queue_len must be positive, using {}", defaults.queue_len);
        params.queue_len = defaults.queue_len;
    }
    if params.required_correct == 0 {
        tracing::warn!(
            "required_correct must be positive, using {}",
            defaults.required_correct
        );
        params.required_correct = defaults.required_correct;
    }
    if params.retry_offsets.is_empty() {
        tracing::warn!("retry_offsets is empty, using {:?}", defaults.retry_offsets);
        params.retry_offsets = defaults.retry_offsets;
    }
    // Inserting front to back keeps each copy at its configured slot
    if !params.retry_offsets.is_sorted_by(|a, b| a < b) {
        params.retry_offsets.sort_unstable();
        params.retry_offsets.dedup();
        tracing::warn!("retry_offsets reordered to {:?}", params.retry_offsets);
    }
    params
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = build_config(None, env(&[]));
        assert_eq!(config, DrillConfig::default());
        assert_eq!(config.scheduler.queue_len, 21);
        assert_eq!(config.scheduler.retry_offsets, vec![5, 10]);
        assert_eq!(config.scheduler.required_correct, 3);
    }

    #[test]
    fn test_env_layer() {
        let config = build_config(
            None,
            env(&[
                (ENV_MODE, "custom-mirrored"),
                (ENV_DECK, "kitchen.json"),
                (ENV_PRACTICE_ROUNDS, "no"),
                (ENV_SEED, "7"),
                (ENV_RECORD_STATS, "0"),
            ]),
        );
        assert_eq!(config.mode, GameMode::CustomMirrored);
        assert_eq!(config.deck_path, Some(PathBuf::from("kitchen.json")));
        assert_eq!(config.practice_rounds, Some(false));
        assert_eq!(config.seed, Some(7));
        assert!(!config.record_stats);
    }

    #[test]
    fn test_file_wins_over_env() {
        let file = parse_config(
            r#"
            [drill]
            mode = "mirrored"
            seed = 99
            "#,
        )
        .unwrap();
        let config = build_config(Some(file), env(&[(ENV_MODE, "custom"), (ENV_SEED, "7")]));
        assert_eq!(config.mode, GameMode::Mirrored);
        assert_eq!(config.seed, Some(99));
    }

    #[test]
    fn test_invalid_env_values_ignored() {
        let config = build_config(
            None,
            env(&[(ENV_MODE, "sideways"), (ENV_SEED, "many"), (ENV_RECORD_STATS, "maybe")]),
        );
        assert_eq!(config.mode, GameMode::Standard);
        assert_eq!(config.seed, None);
        assert!(config.record_stats);
    }

    #[test]
    fn test_scheduler_section() {
        let file = parse_config(
            r#"
            [scheduler]
            queue_len = 8
            retry_offsets = [2]
            required_correct = 2
            "#,
        )
        .unwrap();
        let config = build_config(Some(file), env(&[]));
        assert_eq!(config.scheduler.queue_len, 8);
        assert_eq!(config.scheduler.retry_offsets, vec![2]);
        assert_eq!(config.scheduler.required_correct, 2);
        assert_eq!(config.round_config().scheduler, config.scheduler);
    }

    #[test]
    fn test_invalid_scheduler_falls_back() {
        let file = parse_config(
            r#"
            [scheduler]
            queue_len = 0
            retry_offsets = []
            required_correct = 0
            "#,
        )
        .unwrap();
        let config = build_config(Some(file), env(&[]));
        assert_eq!(config.scheduler, SchedulerParams::default());
    }

    #[test]
    fn test_retry_offsets_sorted_and_deduped() {
        let file = parse_config(
            r#"
            [scheduler]
            retry_offsets = [10, 5, 10]
            "#,
        )
        .unwrap();
        let config = build_config(Some(file), env(&[]));
        assert_eq!(config.scheduler.retry_offsets, vec![5, 10]);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        assert!(parse_config("[drill\nmode = ").is_err());
        assert!(parse_config("[drill]\nseed = \"seven\"").is_err());
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool(" TRUE "), Some(true));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("2"), None);
    }
}
