use std::collections::BTreeSet;

use super::{Classify, Pattern, earlier_on_street};
use crate::game::{
    entities::{ActionEntry, PrimitiveAction, Seat, Street},
    positions::TableGeometry,
};

/// Flop, turn and river rules, pivoting on the preflop aggressor.
#[derive(Clone, Copy, Debug, Default)]
pub struct PostflopClassifier;

/// Seat of the last preflop raise-class action, if anyone raised.
///
/// Every preflop bet or raise labels as a raise-class pattern (open,
/// iso-raise, 3bet, ...), so this is the seat of the last one by order.
#[must_use]
pub fn preflop_aggressor(sequence: &[ActionEntry]) -> Option<Seat> {
    sequence
        .iter()
        .filter(|entry| entry.street == Street::Preflop && entry.action.is_aggressive())
        .max_by_key(|entry| entry.order)
        .map(|entry| entry.seat)
}

/// Opponents still in the hand when `entry` was made: every other seat
/// that acted earlier in the hand and hasn't folded.
#[must_use]
pub fn live_seats_before(entry: &ActionEntry, sequence: &[ActionEntry]) -> BTreeSet<Seat> {
    let earlier = sequence.iter().filter(|other| other.precedes(entry));
    let folded: BTreeSet<Seat> = earlier
        .clone()
        .filter(|other| other.action == PrimitiveAction::Fold)
        .map(|other| other.seat)
        .collect();
    earlier
        .map(|other| other.seat)
        .filter(|seat| *seat != entry.seat && !folded.contains(seat))
        .collect()
}

/// Whether a call labelled `float-call` was followed through: the same
/// seat bets on a later street. Any other call is never a confirmed float.
#[must_use]
pub fn is_float_confirmed(call: &ActionEntry, sequence: &[ActionEntry]) -> bool {
    if call.action != PrimitiveAction::Call || call.street != Street::Flop {
        return false;
    }
    let view = StreetView::new(call, sequence);
    view.call_label() == Pattern::FloatCall
        && sequence.iter().any(|later| {
            later.seat == call.seat
                && later.action == PrimitiveAction::Bet
                && later.street > call.street
                && call.precedes(later)
        })
}

/// The most recent bet or raise the acting seat is responding to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Facing {
    Unopened,
    Cbet,
    CheckRaise(Seat),
    Aggression(Seat),
}

impl Facing {
    const fn bettor(self, aggressor: Option<Seat>) -> Option<Seat> {
        match self {
            Self::Unopened => None,
            Self::Cbet => aggressor,
            Self::CheckRaise(seat) | Self::Aggression(seat) => Some(seat),
        }
    }
}

/// One postflop entry with the street history leading up to it.
struct StreetView<'a> {
    entry: &'a ActionEntry,
    sequence: &'a [ActionEntry],
    earlier: Vec<&'a ActionEntry>,
    aggressor: Option<Seat>,
}

impl<'a> StreetView<'a> {
    fn new(entry: &'a ActionEntry, sequence: &'a [ActionEntry]) -> Self {
        Self {
            entry,
            sequence,
            earlier: earlier_on_street(entry, sequence),
            aggressor: preflop_aggressor(sequence),
        }
    }

    fn before(&self, candidate: &ActionEntry) -> impl Iterator<Item = &&'a ActionEntry> {
        self.earlier.iter().filter(move |other| other.precedes(candidate))
    }

    fn checked_before(&self, seat: Seat, candidate: &ActionEntry) -> bool {
        self.before(candidate)
            .any(|other| other.seat == seat && other.action == PrimitiveAction::Check)
    }

    /// The aggressor's first bet or raise on the street. Responses to it
    /// are c-bet responses, even when it was a check-raise.
    fn is_continuation(&self, candidate: &ActionEntry) -> bool {
        candidate.action.is_aggressive()
            && self.aggressor == Some(candidate.seat)
            && !self
                .before(candidate)
                .any(|other| other.seat == candidate.seat && other.action.is_aggressive())
    }

    /// A continuation that opens the betting.
    fn is_cbet(&self, candidate: &ActionEntry) -> bool {
        candidate.action == PrimitiveAction::Bet && self.is_continuation(candidate)
    }

    fn is_check_raise(&self, candidate: &ActionEntry) -> bool {
        candidate.action == PrimitiveAction::Raise && self.checked_before(candidate.seat, candidate)
    }

    fn facing(&self) -> Facing {
        let Some(last) = self.earlier.iter().rev().find(|other| other.action.is_aggressive()) else {
            return Facing::Unopened;
        };
        if self.is_continuation(last) {
            Facing::Cbet
        } else if self.is_check_raise(last) {
            Facing::CheckRaise(last.seat)
        } else {
            Facing::Aggression(last.seat)
        }
    }

    fn called_previous_street(&self) -> bool {
        self.entry.street.previous().is_some_and(|previous| {
            self.sequence.iter().any(|other| {
                other.street == previous
                    && other.seat == self.entry.seat
                    && other.action == PrimitiveAction::Call
            })
        })
    }

    fn call_label(&self) -> Pattern {
        let facing = self.facing();
        match facing {
            Facing::Cbet => Pattern::CallCbet,
            _ if self.entry.street == Street::Flop
                && self.aggressor.is_some()
                && facing.bettor(self.aggressor) == self.aggressor =>
            {
                Pattern::FloatCall
            }
            _ => Pattern::Call,
        }
    }

    fn bet_label(&self, geometry: &TableGeometry) -> Pattern {
        if self.is_cbet(self.entry) {
            return cbet_label(self.entry, self.sequence, geometry);
        }
        match (self.facing(), self.aggressor) {
            (Facing::Unopened, Some(aggressor)) if self.checked_before(aggressor, self.entry) => {
                Pattern::Probe
            }
            (Facing::Unopened, Some(_)) => Pattern::Donk,
            (Facing::Unopened, None) => Pattern::Stab,
            (_, aggressor) if aggressor != Some(self.entry.seat) && self.called_previous_street() => {
                Pattern::FloatBet
            }
            _ => Pattern::Bet,
        }
    }

    fn raise_label(&self) -> Pattern {
        if self.checked_before(self.entry.seat, self.entry) {
            return Pattern::CheckRaise;
        }
        match self.facing() {
            Facing::Cbet => Pattern::RaiseVsCbet,
            _ => Pattern::ReRaise,
        }
    }

    fn label(&self, geometry: &TableGeometry) -> Pattern {
        match self.entry.action {
            PrimitiveAction::Check => Pattern::Check,
            PrimitiveAction::Fold => match self.facing() {
                Facing::Cbet => Pattern::FoldToCbet,
                Facing::CheckRaise(_) => Pattern::FoldToCheckRaise,
                Facing::Unopened | Facing::Aggression(_) => Pattern::Fold,
            },
            PrimitiveAction::Call => self.call_label(),
            PrimitiveAction::Bet => self.bet_label(geometry),
            PrimitiveAction::Raise => self.raise_label(),
        }
    }
}

/// In position only when the bettor acts after every live opponent.
fn cbet_label(entry: &ActionEntry, sequence: &[ActionEntry], geometry: &TableGeometry) -> Pattern {
    let in_position = live_seats_before(entry, sequence)
        .into_iter()
        .all(|opponent| geometry.is_in_position(entry.seat, opponent));
    if in_position {
        Pattern::CbetInPosition
    } else {
        Pattern::CbetOutOfPosition
    }
}

impl Classify for PostflopClassifier {
    fn classify(
        &self,
        entry: &ActionEntry,
        sequence: &[ActionEntry],
        geometry: &TableGeometry,
    ) -> Option<Pattern> {
        if !entry.street.is_postflop_betting() {
            return None;
        }
        Some(StreetView::new(entry, sequence).label(geometry))
    }
}
