mod common;

use blackjack_engine::cards::Rank::*;
use blackjack_engine::engine::RoundEngine;
use blackjack_engine::errors::SessionError;
use blackjack_engine::events::NullHost;
use blackjack_engine::session::SessionSnapshot;
use common::{dealer, seat, table};

fn played_engine(seed: u64) -> RoundEngine {
    let mut eng = RoundEngine::with_seed(NullHost, seed);
    eng.initiate_game(3, 2).unwrap();
    eng.start_game().unwrap();
    for _ in 0..7 {
        let seat = eng.current_player().unwrap();
        if eng.players()[seat].score() < 14 {
            eng.hit(seat).unwrap();
        } else {
            eng.next_player(seat).unwrap();
        }
    }
    eng
}

#[test]
fn save_then_load_reproduces_the_table() {
    let mut original = played_engine(77);
    let narrative = vec!["Player 1 drew Ace of Hearts.".to_string()];
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("table.sav");

    original.save_to(&path, &narrative).unwrap();

    let mut loaded = RoundEngine::with_seed(NullHost, 1);
    let log = loaded.load_from(&path).unwrap();

    assert_eq!(log, narrative);
    assert_eq!(loaded.current_round(), original.current_round());
    assert_eq!(
        loaded.current_player_index(),
        original.current_player_index()
    );
    let a: Vec<_> = original.shoe().cards().copied().collect();
    let b: Vec<_> = loaded.shoe().cards().copied().collect();
    assert_eq!(a, b);
    assert_eq!(loaded.players(), original.players());
    assert_eq!(loaded.dealer(), original.dealer());
    assert_eq!(
        SessionSnapshot::capture(&loaded, &log),
        SessionSnapshot::capture(&original, &narrative)
    );
}

#[test]
fn save_marks_session_clean_and_actions_dirty_it() {
    let mut eng = played_engine(3);
    assert!(!eng.has_ever_been_saved());
    let dir = tempfile::tempdir().unwrap();
    eng.save_to(&dir.path().join("a.sav"), &[]).unwrap();
    assert!(eng.has_ever_been_saved());
    assert!(!eng.has_unsaved_changes());

    let seat = eng.current_player().unwrap();
    eng.next_player(seat).unwrap();
    assert!(eng.has_unsaved_changes());
}

#[test]
fn loaded_session_counts_as_saved() {
    let mut eng = played_engine(5);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("b.sav");
    eng.save_to(&path, &[]).unwrap();

    let mut other = RoundEngine::with_seed(NullHost, 9);
    other.initiate_game(1, 1).unwrap();
    other.load_from(&path).unwrap();
    assert!(other.has_ever_been_saved());
    assert!(!other.has_unsaved_changes());
}

#[test]
fn failed_loads_leave_the_table_untouched() {
    let mut eng = played_engine(21);
    let before = SessionSnapshot::capture(&eng, &[]);
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("missing.sav");
    assert!(matches!(
        eng.load_from(&missing),
        Err(SessionError::Io { .. })
    ));

    let corrupt = dir.path().join("corrupt.sav");
    std::fs::write(&corrupt, "{ \"round_number\": 2, \"players\": [").unwrap();
    assert!(matches!(
        eng.load_from(&corrupt),
        Err(SessionError::Corrupt { .. })
    ));

    let mut bad = before.clone();
    bad.shoe.multiplier = 0;
    let invalid = dir.path().join("invalid.sav");
    bad.write_to(&invalid).unwrap();
    assert!(matches!(
        eng.load_from(&invalid),
        Err(SessionError::Invalid { .. })
    ));

    let mut empty = table(
        vec![seat(0, "Z", &[Ace, King])],
        dealer(&[Ten, Six]),
        &[],
    );
    empty.round_number = 10;
    let empty_path = dir.path().join("empty.sav");
    empty.write_to(&empty_path).unwrap();
    assert!(matches!(
        eng.load_from(&empty_path),
        Err(SessionError::Invalid { .. })
    ));
    assert!(eng.restore(&empty).is_err());

    assert_eq!(SessionSnapshot::capture(&eng, &[]), before);
    assert_eq!(eng.current_player(), Some(before.current_player_index));
}

#[test]
fn restore_resumes_at_the_saved_seat() {
    let mut snap = table(
        vec![
            seat(0, "A", &[Ten, Nine]),
            seat(1, "B", &[Ten, Two]),
            seat(2, "C", &[Ten, Three]),
        ],
        dealer(&[Ten, Seven]),
        &[Two, Three, Four],
    );
    snap.current_player_index = 1;
    snap.round_number = 6;
    let mut eng = RoundEngine::with_seed(NullHost, 1);
    eng.restore(&snap).unwrap();

    assert_eq!(eng.current_round(), 6);
    assert_eq!(eng.current_player(), Some(1));
    assert!(!eng.players()[0].is_turn_active());
}

#[test]
fn restore_past_the_last_seat_lets_the_dealer_finish_the_round() {
    let mut snap = table(
        vec![seat(0, "A", &[Ten, Nine])],
        dealer(&[Ten, Seven]),
        &[Two, Three, Four, Five],
    );
    snap.current_player_index = 1;
    let mut eng = RoundEngine::with_seed(NullHost, 1);
    eng.restore(&snap).unwrap();

    let rounds = eng.take_completed_rounds();
    assert_eq!(rounds.len(), 1);
    assert_eq!(rounds[0].lines[1], "A wins with 19 against dealer's 17.");
    assert_eq!(eng.current_round(), 2);
    assert_eq!(eng.current_player(), Some(0));
}

#[test]
fn restore_rescores_the_dealer() {
    let mut d = dealer(&[Ten, Seven]);
    // a stale score must not survive the load
    let mut snap_json = serde_json::to_value(&d).unwrap();
    snap_json["score"] = serde_json::json!(3);
    d = serde_json::from_value(snap_json).unwrap();
    assert_eq!(d.score(), 3);

    let snap = table(vec![seat(0, "A", &[Ten, Two])], d, &[Two, Three]);
    let mut eng = RoundEngine::with_seed(NullHost, 1);
    eng.restore(&snap).unwrap();
    assert_eq!(eng.dealer().score(), 17);
}
