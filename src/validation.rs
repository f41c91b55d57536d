//! Incremental answer validation.
//!
//! Input is checked on every change, not only on submit:
//! - `Match` - the normalized input equals the answer
//! - `InProgress` - the input is a correct proper prefix, keep typing
//! - `Diverging` - a character differs or the input ran past the answer
//!
//! Both sides are trimmed, NFC-normalized and lowercased before comparing, so
//! composed and decomposed kana compare equal.

use unicode_normalization::UnicodeNormalization;

/// Classification of the current input against the expected answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
  Match,
  Diverging,
  InProgress,
}

impl Verdict {
  pub fn is_match(&self) -> bool {
    matches!(self, Self::Match)
  }
}

/// Normalize an answer for comparison
fn normalize_answer(input: &str) -> String {
  input.trim().nfc().collect::<String>().to_lowercase()
}

/// Classify typed input against the canonical answer
pub fn classify(input: &str, answer: &str) -> Verdict {
  let typed = normalize_answer(input);
  let expected = normalize_answer(answer);

  if typed == expected {
    return Verdict::Match;
  }

  let mut expected_chars = expected.chars();
  for ch in typed.chars() {
    match expected_chars.next() {
      Some(e) if e == ch => {}
      // Either a differing character or input longer than the answer
      _ => return Verdict::Diverging,
    }
  }

  Verdict::InProgress
}

/// Whether a submitted answer is accepted
pub fn is_match(input: &str, answer: &str) -> bool {
  classify(input, answer).is_match()
}
