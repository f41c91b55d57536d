pub mod config;
pub mod content;
pub mod domain;
pub mod error;
pub mod game;
pub mod paths;
pub mod session;
pub mod sinks;
pub mod srs;
pub mod stats;
pub mod terminal;
pub mod validation;

#[cfg(test)]
mod testing;

pub use error::{DrillError, Result};
pub use game::Game;
pub use session::{Feedback, RoundSession};
