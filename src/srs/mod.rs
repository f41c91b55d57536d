pub mod repetition;
pub mod topology;

pub use repetition::{Credit, RepetitionScheduler, SchedulerParams};
pub use topology::{words_for_round, RoundKind, RoundTopology};
