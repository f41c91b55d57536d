//! Project path functions - single source of truth for all file paths.
//!
//! ## Environment Variables
//!
//! - `DATA_DIR`: Override the base data directory (default: "data")
//!
//! Separate data directories keep stats histories apart:
//! ```bash
//! DATA_DIR=data/alice cargo run
//! ```

use std::env;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Lazily initialized data directory from DATA_DIR env var
static DATA_DIR_VALUE: OnceLock<String> = OnceLock::new();

/// Get the base data directory (from DATA_DIR env var or default "data")
pub fn data_dir() -> &'static str {
    DATA_DIR_VALUE.get_or_init(|| env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()))
}

/// Answer history, one JSON object per line
pub fn stats_log_path() -> String {
    format!("{}/stats/answers.jsonl", data_dir())
}

/// Directory searched for deck files given by bare name
pub fn decks_dir() -> String {
    format!("{}/decks", data_dir())
}

/// Resolve a configured deck path.
///
/// Absolute paths and paths that exist relative to the working directory are
/// used as-is; anything else is looked up in `decks_dir()`.
pub fn resolve_deck_path(path: &Path) -> PathBuf {
    resolve_in(path, Path::new(&decks_dir()))
}

fn resolve_in(path: &Path, decks: &Path) -> PathBuf {
    if path.is_absolute() || path.exists() {
        path.to_path_buf()
    } else {
        decks.join(path)
    }
}

// ==================== Tests ====================
