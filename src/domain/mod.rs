pub mod round;
pub mod word;

pub use round::{AnswerProjection, GameMode, Phase, RoundConfig, RoundIndex};
pub use word::{Word, WordBatch};
