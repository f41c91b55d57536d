mod common;

use common::{harness, play_round};
use vocab_drill::content::{builtin_deck, Deck};
use vocab_drill::domain::{GameMode, Phase, RoundConfig, Word, WordBatch};
use vocab_drill::srs::{Credit, SchedulerParams};
use vocab_drill::terminal::type_and_submit;
use vocab_drill::{DrillError, Feedback};

fn mode(mode: GameMode) -> RoundConfig {
    RoundConfig::new(mode, SchedulerParams::default())
}

#[test]
fn test_builtin_deck_plays_through() {
    let mut h = harness(builtin_deck(), mode(GameMode::Standard));
    assert_eq!(h.game.max_round(), 4);

    h.game.start_round(1).unwrap();
    play_round(&mut h.game);
    for _ in 2..=4 {
        h.game.advance_to_next_round().unwrap();
        play_round(&mut h.game);
    }
    assert_eq!(
        h.game.advance_to_next_round(),
        Err(DrillError::NoNextRound { round: 4 })
    );

    let rounds = h.rounds.borrow();
    assert_eq!(
        rounds.titles,
        vec![
            "Introduction Round 1",
            "Practice Round 1",
            "Introduction Round 2",
            "Practice Round 2",
        ]
    );
    assert_eq!(rounds.completions.last(), Some(&true));

    let tally = h.stats.borrow().tally();
    assert_eq!(tally.incorrect, 0);
    assert!(tally.correct > 0);
}

#[test]
fn test_mirrored_mode_asks_for_source() {
    let mut h = harness(builtin_deck(), mode(GameMode::Mirrored));
    h.game.start_round(1).unwrap();

    let session = h.game.session().unwrap();
    assert_eq!(session.current_prompt(), Some("dog"));
    assert_eq!(session.current_answer(), Some("いぬ"));
}

#[test]
fn test_wrong_line_while_repeating_reschedules_the_word() {
    let mut h = harness(builtin_deck(), mode(GameMode::Standard));
    h.game.start_round(1).unwrap();

    // Learning and elimination: five words each
    for _ in 0..10 {
        let answer = h.game.session().unwrap().current_answer().unwrap().to_string();
        type_and_submit(&mut h.game, &answer).unwrap();
    }
    assert_eq!(h.game.session().unwrap().phase(), Phase::Repeating);
    let missed = h.game.session().unwrap().current_word().unwrap().key().to_string();

    // Diverges on the first character, then Enter submits the cleared field
    assert_eq!(type_and_submit(&mut h.game, "zebra"), Ok(Feedback::Wrong));
    assert_eq!(h.stats.borrow().tally().incorrect, 1);

    let session = h.game.session().unwrap();
    let scheduler = session.scheduler().unwrap();
    assert!(scheduler.is_pending(&missed));
    assert_eq!(scheduler.correct_count(&missed), 0);
    assert_ne!(session.current_word().unwrap().key(), missed);

    // The next correct answer for the missed word pays the make-up credit
    loop {
        let session = h.game.session().unwrap();
        let is_missed = session.current_word().unwrap().key() == missed;
        let answer = session.current_answer().unwrap().to_string();
        let feedback = type_and_submit(&mut h.game, &answer).unwrap();
        if is_missed {
            assert_eq!(feedback, Feedback::Correct(Credit::MakeUp));
            break;
        }
    }

    play_round(&mut h.game);
    assert!(h.game.is_round_complete());
    assert_eq!(h.stats.borrow().tally().incorrect, 1);
}

#[test]
fn test_without_practice_rounds_each_round_is_one_batch() {
    let deck = Deck::new(
        "two",
        vec![
            WordBatch::new(vec![Word::new("a", "alpha")]),
            WordBatch::new(vec![Word::new("b", "bravo")]),
        ],
    )
    .with_practice_rounds(false);
    let mut h = harness(deck, mode(GameMode::Custom));
    assert_eq!(h.game.max_round(), 2);

    h.game.start_round(2).unwrap();
    let words = h.game.session().unwrap().words().to_vec();
    assert_eq!(words, vec![Word::new("b", "bravo")]);
    assert_eq!(h.rounds.borrow().titles, vec!["Introduction Round 2"]);
}

#[test]
fn test_round_jump_discards_attempt() {
    let mut h = harness(builtin_deck(), mode(GameMode::Standard));
    h.game.start_round(1).unwrap();
    let answer = h.game.session().unwrap().current_answer().unwrap().to_string();
    type_and_submit(&mut h.game, &answer).unwrap();

    h.game.start_round(3).unwrap();
    let session = h.game.session().unwrap();
    assert_eq!(session.phase(), Phase::Learning);
    assert_eq!(session.current_prompt(), Some("ほん"));
    assert_eq!(
        h.game.start_round(5),
        Err(DrillError::RoundOutOfRange { round: 5, max: 4 })
    );
}
