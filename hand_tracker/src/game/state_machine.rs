//! Table state machine.
//!
//! [`TableState`] is the per-hand state: street, button, hero seat, absent
//! seats and the canonical action sequence. Every change goes through a
//! [`Transition`]. Applying a transition never fails loudly: a rejected
//! transition hands back the unchanged state together with the reason, so an
//! interactive input loop can ignore it while tests and importers can branch
//! on it.

use log::debug;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fmt};
use thiserror::Error;

use super::{
    constants::{DEFAULT_BUTTON_SEAT, DEFAULT_SEAT_COUNT, FIRST_ORDER},
    entities::{ActionEntry, PrimitiveAction, Seat, Street},
    positions::TableGeometry,
    validation::SchemaViolation,
};
use crate::{
    config::TrackerConfig,
    persistence::{LegacySeatActions, to_legacy},
};

/// Reasons a transition left the state unchanged.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum RejectReason {
    #[error("unknown action: {0}")]
    UnknownAction(String),
    #[error("seat {seat} is outside 1..={seat_count}")]
    SeatOutOfRange { seat: Seat, seat_count: usize },
    #[error("no valid seats in batch")]
    NoValidSeats,
    #[error("nothing to undo")]
    NothingToUndo,
    #[error("schema violation: {0}")]
    Schema(#[from] SchemaViolation),
}

/// Every way the table state can change.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Transition {
    /// Direct set, used for corrections.
    SetStreet { street: Street },
    /// Move to the next street. Idempotent at showdown.
    AdvanceStreet,
    SetButton { seat: Seat },
    AdvanceButton,
    SetMySeat { seat: Option<Seat> },
    /// Record the same action for a batch of seats, in input order.
    /// Out-of-range seats are dropped; an unknown action rejects the batch.
    RecordAction { seats: Vec<Seat>, action: String },
    /// With a seat: remove that seat's latest entry on the current street.
    /// Without: pop the latest entry of the hand.
    UndoLast { seat: Option<Seat> },
    ToggleAbsent { seats: Vec<Seat> },
    ClearStreetActions,
    ClearSeatActions { seats: Vec<Seat> },
    /// Fresh hand with the button kept and absences cleared.
    ResetHand,
    /// Fresh hand with the button rotated and absences kept.
    NextHand,
    Hydrate { saved: SavedTableState },
}

impl Transition {
    /// Typed constructor for [`Transition::RecordAction`].
    #[must_use]
    pub fn record(seats: &[Seat], action: PrimitiveAction) -> Self {
        Self::RecordAction {
            seats: seats.to_vec(),
            action: action.to_string(),
        }
    }

    /// Wire name of the transition kind, used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::SetStreet { .. } => "set-street",
            Self::AdvanceStreet => "advance-street",
            Self::SetButton { .. } => "set-button",
            Self::AdvanceButton => "advance-button",
            Self::SetMySeat { .. } => "set-my-seat",
            Self::RecordAction { .. } => "record-action",
            Self::UndoLast { .. } => "undo-last",
            Self::ToggleAbsent { .. } => "toggle-absent",
            Self::ClearStreetActions => "clear-street-actions",
            Self::ClearSeatActions { .. } => "clear-seat-actions",
            Self::ResetHand => "reset-hand",
            Self::NextHand => "next-hand",
            Self::Hydrate { .. } => "hydrate",
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self.kind();
        match self {
            Self::SetStreet { street } => write!(f, "{kind} {street}"),
            Self::SetButton { seat } => write!(f, "{kind} {seat}"),
            Self::SetMySeat { seat: Some(seat) } => write!(f, "{kind} {seat}"),
            Self::RecordAction { seats, action } => write!(f, "{kind} {action} {seats:?}"),
            Self::UndoLast { seat: Some(seat) } => write!(f, "{kind} {seat}"),
            Self::ToggleAbsent { seats } | Self::ClearSeatActions { seats } => {
                write!(f, "{kind} {seats:?}")
            }
            _ => write!(f, "{kind}"),
        }
    }
}

/// A persisted table, possibly written by an older version. Missing fields
/// keep their current value when hydrating.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SavedTableState {
    pub seat_count: Option<usize>,
    pub current_street: Option<Street>,
    pub button_seat: Option<Seat>,
    pub my_seat: Option<Seat>,
    pub absent_seats: Option<BTreeSet<Seat>>,
    pub action_sequence: Option<Vec<ActionEntry>>,
}

/// Per-hand table state.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableState {
    pub seat_count: usize,
    pub current_street: Street,
    pub button_seat: Seat,
    /// Hero seat, independent of the button.
    pub my_seat: Option<Seat>,
    pub absent_seats: BTreeSet<Seat>,
    pub action_sequence: Vec<ActionEntry>,
}

impl Default for TableState {
    fn default() -> Self {
        Self::new(DEFAULT_SEAT_COUNT, DEFAULT_BUTTON_SEAT)
    }
}

impl From<&TrackerConfig> for TableState {
    fn from(config: &TrackerConfig) -> Self {
        Self::new(config.seat_count, config.button_seat)
    }
}

impl TableState {
    #[must_use]
    pub fn new(seat_count: usize, button_seat: Seat) -> Self {
        Self {
            seat_count,
            current_street: Street::Preflop,
            button_seat,
            my_seat: None,
            absent_seats: BTreeSet::new(),
            action_sequence: Vec::new(),
        }
    }

    #[must_use]
    pub const fn geometry(&self) -> TableGeometry {
        TableGeometry::new(self.seat_count, self.button_seat)
    }

    /// The `order` the next recorded entry receives.
    #[must_use]
    pub fn next_order(&self) -> u32 {
        self.action_sequence
            .iter()
            .map(|entry| entry.order)
            .max()
            .map_or(FIRST_ORDER, |order| order.saturating_add(1))
    }

    /// Entries recorded on `street`, in order.
    pub fn entries_on(&self, street: Street) -> impl Iterator<Item = &ActionEntry> {
        self.action_sequence
            .iter()
            .filter(move |entry| entry.street == street)
    }

    /// Whether `seat` has any entry on the current street.
    #[must_use]
    pub fn has_acted_this_street(&self, seat: Seat) -> bool {
        self.entries_on(self.current_street)
            .any(|entry| entry.seat == seat)
    }

    /// The per-street/per-seat view older consumers expect, computed from the
    /// sequence on demand.
    #[must_use]
    pub fn legacy_seat_actions(&self) -> LegacySeatActions {
        to_legacy(&self.action_sequence)
    }

    /// Apply `transition` with the local checks only. See
    /// [`crate::game::validation::apply`] for the schema-checked version.
    #[must_use]
    pub fn transition(&self, transition: &Transition) -> ActionOutcome {
        let mut next = self.clone();
        match next.apply(transition) {
            Ok(()) => ActionOutcome::Applied(next),
            Err(reason) => {
                debug!(
                    "rejected {transition} on {}: {reason}",
                    self.current_street
                );
                ActionOutcome::Rejected {
                    reason,
                    state: self.clone(),
                }
            }
        }
    }

    fn apply(&mut self, transition: &Transition) -> Result<(), RejectReason> {
        match transition {
            Transition::SetStreet { street } => self.current_street = *street,
            Transition::AdvanceStreet => self.current_street = self.current_street.next(),
            Transition::SetButton { seat } => {
                self.check_seat(*seat)?;
                self.button_seat = *seat;
            }
            Transition::AdvanceButton => self.advance_button(),
            Transition::SetMySeat { seat } => {
                if let Some(seat) = seat {
                    self.check_seat(*seat)?;
                }
                self.my_seat = *seat;
            }
            Transition::RecordAction { seats, action } => self.record_action(seats, action)?,
            Transition::UndoLast { seat } => self.undo_last(*seat)?,
            Transition::ToggleAbsent { seats } => {
                for seat in self.valid_seats(seats) {
                    if !self.absent_seats.remove(&seat) {
                        self.absent_seats.insert(seat);
                    }
                }
            }
            Transition::ClearStreetActions => {
                let street = self.current_street;
                self.action_sequence.retain(|entry| entry.street != street);
            }
            Transition::ClearSeatActions { seats } => {
                let street = self.current_street;
                self.action_sequence
                    .retain(|entry| entry.street != street || !seats.contains(&entry.seat));
            }
            Transition::ResetHand => {
                self.start_hand();
                self.absent_seats.clear();
            }
            Transition::NextHand => {
                self.start_hand();
                self.advance_button();
            }
            Transition::Hydrate { saved } => self.hydrate(saved.clone()),
        }
        Ok(())
    }

    fn check_seat(&self, seat: Seat) -> Result<(), RejectReason> {
        if self.geometry().contains(seat) {
            Ok(())
        } else {
            Err(RejectReason::SeatOutOfRange {
                seat,
                seat_count: self.seat_count,
            })
        }
    }

    fn valid_seats(&self, seats: &[Seat]) -> Vec<Seat> {
        let geometry = self.geometry();
        seats
            .iter()
            .copied()
            .filter(|&seat| {
                let valid = geometry.contains(seat);
                if !valid {
                    debug!("dropping seat {seat} outside 1..={}", self.seat_count);
                }
                valid
            })
            .collect()
    }

    fn advance_button(&mut self) {
        self.button_seat = self.geometry().seat_after(self.button_seat, 1);
    }

    fn record_action(&mut self, seats: &[Seat], action: &str) -> Result<(), RejectReason> {
        let action: PrimitiveAction = action
            .parse()
            .map_err(|_| RejectReason::UnknownAction(action.to_string()))?;
        let seats = self.valid_seats(seats);
        if seats.is_empty() {
            return Err(RejectReason::NoValidSeats);
        }

        let street = self.current_street;
        for seat in seats {
            let order = self.next_order();
            self.action_sequence
                .push(ActionEntry::new(seat, action, street, order));
            self.absent_seats.remove(&seat);
        }
        Ok(())
    }

    fn undo_last(&mut self, seat: Option<Seat>) -> Result<(), RejectReason> {
        let street = self.current_street;
        let idx = match seat {
            Some(seat) => self
                .action_sequence
                .iter()
                .rposition(|entry| entry.seat == seat && entry.street == street),
            None => self.action_sequence.len().checked_sub(1),
        };
        let idx = idx.ok_or(RejectReason::NothingToUndo)?;
        self.action_sequence.remove(idx);
        Ok(())
    }

    fn start_hand(&mut self) {
        self.current_street = Street::Preflop;
        self.action_sequence.clear();
    }

    fn hydrate(&mut self, saved: SavedTableState) {
        let SavedTableState {
            seat_count,
            current_street,
            button_seat,
            my_seat,
            absent_seats,
            action_sequence,
        } = saved;
        self.seat_count = seat_count.unwrap_or(self.seat_count);
        self.current_street = current_street.unwrap_or(self.current_street);
        self.button_seat = button_seat.unwrap_or(self.button_seat);
        self.my_seat = my_seat.or(self.my_seat);
        if let Some(absent_seats) = absent_seats {
            self.absent_seats = absent_seats;
        }
        if let Some(action_sequence) = action_sequence {
            self.action_sequence = action_sequence;
        }
    }
}

/// Result of applying a [`Transition`].
#[derive(Clone, Debug, PartialEq)]
pub enum ActionOutcome {
    Applied(TableState),
    /// The state is the untouched pre-transition state.
    Rejected {
        reason: RejectReason,
        state: TableState,
    },
}

impl ActionOutcome {
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    #[must_use]
    pub const fn state(&self) -> &TableState {
        match self {
            Self::Applied(state) | Self::Rejected { state, .. } => state,
        }
    }

    #[must_use]
    pub fn into_state(self) -> TableState {
        match self {
            Self::Applied(state) | Self::Rejected { state, .. } => state,
        }
    }

    #[must_use]
    pub const fn reason(&self) -> Option<&RejectReason> {
        match self {
            Self::Applied(_) => None,
            Self::Rejected { reason, .. } => Some(reason),
        }
    }
}
