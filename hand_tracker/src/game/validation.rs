//! Schema validation over whole table states.
//!
//! The transition function already checks its own inputs. This layer checks
//! the *result* of every transition against a declared per-field schema and
//! rolls back to the pre-transition state on any violation, so a long
//! session cannot accumulate a structurally invalid action log even when a
//! transition (e.g. hydrate) bypasses the local checks.

use log::warn;
use thiserror::Error;

use super::{
    constants::{MAX_SEATS, MIN_SEATS},
    entities::{Seat, Street},
    state_machine::{ActionOutcome, TableState, Transition},
};

/// A field of [`TableState`] that broke its schema rule.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum SchemaViolation {
    #[error("seatCount {0} outside {min}..={max}", min = MIN_SEATS, max = MAX_SEATS)]
    SeatCount(usize),
    #[error("buttonSeat {seat} outside 1..={seat_count}")]
    ButtonSeat { seat: Seat, seat_count: usize },
    #[error("mySeat {seat} outside 1..={seat_count}")]
    MySeat { seat: Seat, seat_count: usize },
    #[error("absentSeats contains {seat} outside 1..={seat_count}")]
    AbsentSeat { seat: Seat, seat_count: usize },
    #[error("actionSequence entry #{order} has seat {seat} outside 1..={seat_count}")]
    EntrySeat {
        order: u32,
        seat: Seat,
        seat_count: usize,
    },
    #[error("actionSequence order {order} does not follow {previous}")]
    OrderNotIncreasing { previous: u32, order: u32 },
}

type FieldRule = fn(&TableState) -> Result<(), SchemaViolation>;

/// Declared schema: one rule per field, checked in this order.
const TABLE_SCHEMA: &[(&str, FieldRule)] = &[
    ("seatCount", check_seat_count),
    ("buttonSeat", check_button_seat),
    ("mySeat", check_my_seat),
    ("absentSeats", check_absent_seats),
    ("actionSequence", check_action_sequence),
    ("currentStreet", check_current_street),
];

/// Validate every field of `state`, reporting the first violation.
pub fn validate(state: &TableState) -> Result<(), SchemaViolation> {
    TABLE_SCHEMA.iter().try_for_each(|(_, rule)| rule(state))
}

/// Names of the fields covered by the schema.
pub fn schema_fields() -> impl Iterator<Item = &'static str> {
    TABLE_SCHEMA.iter().map(|(field, _)| *field)
}

/// Apply `transition` and validate the resulting state. On a schema
/// violation the pre-transition state is returned as rejected.
#[must_use]
pub fn apply(state: &TableState, transition: &Transition) -> ActionOutcome {
    match state.transition(transition) {
        ActionOutcome::Applied(next) => match validate(&next) {
            Ok(()) => ActionOutcome::Applied(next),
            Err(violation) => {
                warn!(
                    "rolled back {} on {}: {violation} (payload: {transition:?})",
                    transition.kind(),
                    state.current_street
                );
                ActionOutcome::Rejected {
                    reason: violation.into(),
                    state: state.clone(),
                }
            }
        },
        rejected => rejected,
    }
}

fn check_seat_count(state: &TableState) -> Result<(), SchemaViolation> {
    if (MIN_SEATS..=MAX_SEATS).contains(&state.seat_count) {
        Ok(())
    } else {
        Err(SchemaViolation::SeatCount(state.seat_count))
    }
}

fn check_button_seat(state: &TableState) -> Result<(), SchemaViolation> {
    if state.geometry().contains(state.button_seat) {
        Ok(())
    } else {
        Err(SchemaViolation::ButtonSeat {
            seat: state.button_seat,
            seat_count: state.seat_count,
        })
    }
}

fn check_my_seat(state: &TableState) -> Result<(), SchemaViolation> {
    match state.my_seat {
        Some(seat) if !state.geometry().contains(seat) => Err(SchemaViolation::MySeat {
            seat,
            seat_count: state.seat_count,
        }),
        _ => Ok(()),
    }
}

// A BTreeSet is deduplicated by construction; only the range is checked.
fn check_absent_seats(state: &TableState) -> Result<(), SchemaViolation> {
    let geometry = state.geometry();
    match state
        .absent_seats
        .iter()
        .find(|&&seat| !geometry.contains(seat))
    {
        Some(&seat) => Err(SchemaViolation::AbsentSeat {
            seat,
            seat_count: state.seat_count,
        }),
        None => Ok(()),
    }
}

fn check_action_sequence(state: &TableState) -> Result<(), SchemaViolation> {
    let geometry = state.geometry();
    let mut previous = 0;
    for entry in &state.action_sequence {
        if !geometry.contains(entry.seat) {
            return Err(SchemaViolation::EntrySeat {
                order: entry.order,
                seat: entry.seat,
                seat_count: state.seat_count,
            });
        }
        if entry.order <= previous {
            return Err(SchemaViolation::OrderNotIncreasing {
                previous,
                order: entry.order,
            });
        }
        previous = entry.order;
    }
    Ok(())
}

// `Street` is a closed enum, so any deserialized value is one of the five
// streets. `SetStreet` may move backwards over recorded entries to correct a
// mistaken advance; new entries still take the current street when appended.
fn check_current_street(_state: &TableState) -> Result<(), SchemaViolation> {
    Ok(())
}
