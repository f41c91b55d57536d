//! Bundled starter deck used when no custom deck is selected.

use super::Deck;
use crate::domain::{Word, WordBatch};

const BUILTIN_NAME: &str = "Basics";

/// (batch name, [(source, target)])
const BUILTIN_BATCHES: &[(&str, &[(&str, &str)])] = &[
    (
        "Around the house",
        &[
            ("いぬ", "dog"),
            ("ねこ", "cat"),
            ("いえ", "house"),
            ("くるま", "car"),
            ("みず", "water"),
        ],
    ),
    (
        "At the desk",
        &[
            ("ほん", "book"),
            ("つくえ", "desk"),
            ("でんわ", "phone"),
            ("まど", "window"),
            ("とけい", "clock"),
        ],
    ),
];

/// The starter deck: two five-word batches with practice rounds enabled.
pub fn builtin_deck() -> Deck {
    let batches = BUILTIN_BATCHES
        .iter()
        .map(|(name, words)| {
            WordBatch::named(
                *name,
                words
                    .iter()
                    .map(|(source, target)| Word::new(*source, *target))
                    .collect(),
            )
        })
        .collect();
    Deck::new(BUILTIN_NAME, batches)
}
