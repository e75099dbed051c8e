//! Integration tests for the table store lifecycle.
//!
//! Drives a full hand through the public store API and checks the
//! sequence, the derived legacy view and the rejection guarantees.

use hand_tracker::{
    ActionEntry, PrimitiveAction, RejectReason, SavedTableState, Street, TableState, TableStore,
    Transition, TrackerConfig,
    game::validation,
};

fn store_with(seat_count: usize, button_seat: usize) -> TableStore {
    TableStore::from(&TrackerConfig {
        seat_count,
        button_seat,
    })
}

fn entries(store: &TableStore) -> Vec<(usize, PrimitiveAction, Street, u32)> {
    store
        .state()
        .action_sequence
        .iter()
        .map(|e| (e.seat, e.action, e.street, e.order))
        .collect()
}

#[test]
fn test_full_hand_lifecycle() {
    let mut store = store_with(9, 9);
    store.record_action(&[1, 2], "fold").unwrap();
    store.record_action(&[3], "raise").unwrap();
    store.record_action(&[4, 5, 6, 7, 8], "fold").unwrap();
    store.record_action(&[9], "call").unwrap();
    store.advance_street().unwrap();
    store.record_action(&[3], "bet").unwrap();
    store.record_action(&[9], "call").unwrap();
    store.advance_street().unwrap();
    store.record_action(&[3, 9], "check").unwrap();

    let state = store.state();
    assert_eq!(state.current_street, Street::Turn);
    assert_eq!(state.action_sequence.len(), 13);
    assert!(
        state
            .action_sequence
            .windows(2)
            .all(|pair| pair[0].order < pair[1].order)
    );

    let legacy = state.legacy_seat_actions();
    assert_eq!(
        legacy.actions(Street::Flop, 9),
        Some(&["call".to_string()][..])
    );
    assert_eq!(
        legacy.actions(Street::Turn, 3),
        Some(&["check".to_string()][..])
    );

    store.next_hand().unwrap();
    assert_eq!(store.state().button_seat, 1);
    assert_eq!(store.state().current_street, Street::Preflop);
    assert!(store.state().action_sequence.is_empty());
}

#[test]
fn test_batch_partial_success() {
    let mut store = store_with(9, 1);
    store.record_action(&[0, 3, 10, 5], "fold").unwrap();
    assert_eq!(
        entries(&store),
        vec![
            (3, PrimitiveAction::Fold, Street::Preflop, 1),
            (5, PrimitiveAction::Fold, Street::Preflop, 2),
        ]
    );
}

#[test]
fn test_batch_with_no_valid_seat_is_rejected() {
    let mut store = store_with(9, 1);
    assert_eq!(
        store.record_action(&[0, 10], "fold"),
        Err(RejectReason::NoValidSeats)
    );
    assert!(store.state().action_sequence.is_empty());
}

#[test]
fn test_unknown_action_leaves_sequence_unchanged() {
    let mut store = store_with(9, 1);
    store.record_action(&[3], "call").unwrap();
    let before = store.state().action_sequence.clone();

    let result = store.record_action(&[3], "not_a_real_action");
    assert!(matches!(result, Err(RejectReason::UnknownAction(_))));
    assert_eq!(store.state().action_sequence, before);

    // Display aliases aren't primitives.
    assert!(store.record_action(&[3], "3bet").is_err());
    assert_eq!(store.state().action_sequence, before);
}

#[test]
fn test_button_wraparound() {
    let mut store = store_with(9, 9);
    store.advance_button().unwrap();
    assert_eq!(store.state().button_seat, 1);

    let mut store = store_with(9, 5);
    store.advance_button().unwrap();
    assert_eq!(store.state().button_seat, 6);
}

#[test]
fn test_recording_marks_seat_present() {
    let mut store = store_with(6, 1);
    store.toggle_absent(&[2, 4]).unwrap();
    store.record_action(&[4], "call").unwrap();
    let absent: Vec<usize> = store.state().absent_seats.iter().copied().collect();
    assert_eq!(absent, vec![2]);
}

#[test]
fn test_undo_by_seat_and_global() {
    let mut store = store_with(9, 1);
    store.record_action(&[4], "raise").unwrap();
    store.record_action(&[5], "call").unwrap();
    store.record_action(&[4], "call").unwrap();

    store.undo_last(4).unwrap();
    assert_eq!(
        entries(&store),
        vec![
            (4, PrimitiveAction::Raise, Street::Preflop, 1),
            (5, PrimitiveAction::Call, Street::Preflop, 2),
        ]
    );
    assert_eq!(
        store.state().legacy_seat_actions().actions(Street::Preflop, 4),
        Some(&["raise".to_string()][..])
    );

    store.undo_latest().unwrap();
    assert_eq!(store.state().action_sequence.len(), 1);
    // Orders continue from the highest remaining entry.
    store.record_action(&[6], "fold").unwrap();
    assert_eq!(store.state().action_sequence[1].order, 2);

    assert_eq!(store.undo_last(8), Err(RejectReason::NothingToUndo));
}

#[test]
fn test_undo_only_touches_current_street() {
    let mut store = store_with(9, 1);
    store.record_action(&[4], "raise").unwrap();
    store.advance_street().unwrap();
    assert_eq!(store.undo_last(4), Err(RejectReason::NothingToUndo));
    assert_eq!(store.state().action_sequence.len(), 1);
}

#[test]
fn test_clear_street_and_seat_actions() {
    let mut store = store_with(9, 1);
    store.record_action(&[4, 5], "call").unwrap();
    store.advance_street().unwrap();
    store.record_action(&[4, 5], "check").unwrap();

    store.clear_seat_actions(&[5]).unwrap();
    assert_eq!(store.state().action_sequence.len(), 3);

    store.clear_street_actions().unwrap();
    assert!(
        store
            .state()
            .action_sequence
            .iter()
            .all(|e| e.street == Street::Preflop)
    );
    assert_eq!(store.state().action_sequence.len(), 2);
}

#[test]
fn test_set_street_corrects_mistaken_advance() {
    let mut store = store_with(9, 1);
    store.record_action(&[4], "raise").unwrap();
    store.advance_street().unwrap();
    store.record_action(&[4], "bet").unwrap();

    store.set_street(Street::Preflop).unwrap();
    assert_eq!(store.state().current_street, Street::Preflop);
    assert_eq!(store.state().action_sequence.len(), 2);

    store.record_action(&[1], "call").unwrap();
    assert_eq!(
        entries(&store)[2],
        (1, PrimitiveAction::Call, Street::Preflop, 3)
    );
}

#[test]
fn test_showdown_is_terminal() {
    let mut store = store_with(9, 1);
    for _ in 0..6 {
        store.advance_street().unwrap();
    }
    assert_eq!(store.state().current_street, Street::Showdown);
}

#[test]
fn test_hydrate_then_continue() {
    let mut store = store_with(9, 1);
    let saved: SavedTableState = serde_json::from_str(
        r#"{
            "seatCount": 6,
            "buttonSeat": 3,
            "currentStreet": "flop",
            "actionSequence": [
                {"seat": 6, "action": "raise", "street": "preflop", "order": 1},
                {"seat": 2, "action": "call", "street": "preflop", "order": 2}
            ]
        }"#,
    )
    .unwrap();
    store.hydrate(saved).unwrap();
    store.record_action(&[2], "check").unwrap();

    let last = store.state().action_sequence.last().copied().unwrap();
    assert_eq!(last, ActionEntry::new(2, PrimitiveAction::Check, Street::Flop, 3));
}

#[test]
fn test_hydrate_rejects_unordered_sequence() {
    let mut store = store_with(9, 1);
    let saved = SavedTableState {
        action_sequence: Some(vec![
            ActionEntry::new(3, PrimitiveAction::Call, Street::Preflop, 2),
            ActionEntry::new(4, PrimitiveAction::Raise, Street::Preflop, 2),
        ]),
        ..SavedTableState::default()
    };
    assert!(store.hydrate(saved).is_err());
    assert!(store.state().action_sequence.is_empty());
}

#[test]
fn test_transition_stream_from_json() {
    let transitions: Vec<Transition> = serde_json::from_str(
        r#"[
            {"type": "record-action", "seats": [4], "action": "raise"},
            {"type": "record-action", "seats": [5, 6], "action": "call"},
            {"type": "advance-street"},
            {"type": "set-my-seat", "seat": 5},
            {"type": "undo-last", "seat": null}
        ]"#,
    )
    .unwrap();

    let mut store = TableStore::default();
    for transition in &transitions {
        store.dispatch(transition).unwrap();
    }
    assert_eq!(store.state().my_seat, Some(5));
    assert_eq!(store.state().current_street, Street::Flop);
    assert_eq!(store.state().action_sequence.len(), 2);
}

#[test]
fn test_pure_transition_reports_outcome() {
    let state = TableState::default();
    let outcome = validation::apply(&state, &Transition::SetButton { seat: 12 });
    assert!(!outcome.is_applied());
    assert_eq!(outcome.state(), &state);
    assert!(matches!(
        outcome.reason(),
        Some(RejectReason::SeatOutOfRange { seat: 12, .. })
    ));
}
