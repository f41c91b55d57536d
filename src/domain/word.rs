use serde::{Deserialize, Serialize};

/// A word as supplied by a deck: its source-script form and its translation.
///
/// The source form doubles as the word's identity, so two entries with the same
/// source share one correct-answer counter inside a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
  pub source: String,
  pub target: String,
}

impl Word {
  pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
    Self {
      source: source.into(),
      target: target.into(),
    }
  }

  pub fn key(&self) -> &str {
    &self.source
  }
}

/// Words introduced together in one introduction round.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordBatch {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  pub words: Vec<Word>,
}

impl WordBatch {
  pub fn new(words: Vec<Word>) -> Self {
    Self { name: None, words }
  }

  pub fn named(name: impl Into<String>, words: Vec<Word>) -> Self {
    Self {
      name: Some(name.into()),
      words,
    }
  }

  pub fn len(&self) -> usize {
    self.words.len()
  }

  pub fn is_empty(&self) -> bool {
    self.words.is_empty()
  }
}
