//! Conversion between the canonical action sequence and the older
//! `{ street -> { seat -> [action, ...] } }` layout.

use log::debug;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::game::{
    constants::FIRST_ORDER,
    entities::{ActionEntry, PrimitiveAction, Seat, Street},
};

/// Legacy per-street, per-seat action lists. Each seat's list is in the
/// order the actions were taken.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LegacySeatActions(BTreeMap<Street, BTreeMap<Seat, Vec<String>>>);

impl LegacySeatActions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a legacy map out of arbitrary JSON without failing.
    ///
    /// Unknown street names, streets that aren't objects, non-numeric seat
    /// keys, seat values that aren't arrays and non-string actions all
    /// contribute nothing.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let mut legacy = Self::default();
        let Some(streets) = value.as_object() else {
            debug!("ignoring legacy seat actions that aren't an object");
            return legacy;
        };

        for (street_name, seats) in streets {
            let Ok(street) = street_name.parse::<Street>() else {
                debug!("ignoring unknown legacy street {street_name:?}");
                continue;
            };
            let Some(seats) = seats.as_object() else {
                debug!("ignoring malformed legacy street {street}");
                continue;
            };
            for (seat_key, actions) in seats {
                let (Ok(seat), Some(actions)) = (seat_key.trim().parse::<Seat>(), actions.as_array())
                else {
                    debug!("ignoring malformed legacy seat {seat_key:?} on {street}");
                    continue;
                };
                legacy
                    .0
                    .entry(street)
                    .or_default()
                    .entry(seat)
                    .or_default()
                    .extend(actions.iter().filter_map(Value::as_str).map(str::to_string));
            }
        }
        legacy
    }

    /// Append `action` to `seat`'s list on `street`.
    pub fn push(&mut self, street: Street, seat: Seat, action: impl Into<String>) {
        self.0
            .entry(street)
            .or_default()
            .entry(seat)
            .or_default()
            .push(action.into());
    }

    #[must_use]
    pub fn actions(&self, street: Street, seat: Seat) -> Option<&[String]> {
        self.0
            .get(&street)
            .and_then(|seats| seats.get(&seat))
            .map(Vec::as_slice)
    }

    /// Seats with a list on `street`, ascending.
    pub fn seats_on(&self, street: Street) -> impl Iterator<Item = (&Seat, &Vec<String>)> {
        self.0.get(&street).into_iter().flatten()
    }

    /// True when no seat has any action on any street.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0
            .values()
            .flat_map(BTreeMap::values)
            .all(Vec::is_empty)
    }
}

impl From<BTreeMap<Street, BTreeMap<Seat, Vec<String>>>> for LegacySeatActions {
    fn from(value: BTreeMap<Street, BTreeMap<Seat, Vec<String>>>) -> Self {
        Self(value)
    }
}

// Lenient like `from_value`: a malformed legacy map deserializes to fewer
// entries instead of failing the whole record.
impl<'de> Deserialize<'de> for LegacySeatActions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

/// Flatten a legacy map into a sequence.
///
/// Streets go in dealing order and seats ascending, each seat's list in its
/// stored order. Showdown lists hold outcome markers, not decisions, and are
/// dropped, as is any action name outside the legacy vocabulary. Orders are
/// assigned from 1 across the whole flattening.
#[must_use]
pub fn to_sequence(legacy: &LegacySeatActions) -> Vec<ActionEntry> {
    let mut order = FIRST_ORDER;
    let mut sequence = Vec::new();
    for street in Street::BETTING {
        for (&seat, actions) in legacy.seats_on(street) {
            for name in actions {
                let Some(action) = PrimitiveAction::from_legacy(name) else {
                    debug!("dropping unrecognized legacy action {name:?} for seat {seat} on {street}");
                    continue;
                };
                sequence.push(ActionEntry::new(seat, action, street, order));
                order += 1;
            }
        }
    }
    sequence
}

/// Project a sequence onto the legacy layout using primitive names.
#[must_use]
pub fn to_legacy(sequence: &[ActionEntry]) -> LegacySeatActions {
    let mut entries: Vec<&ActionEntry> = sequence.iter().collect();
    entries.sort_by_key(|entry| entry.order);

    let mut legacy = LegacySeatActions::new();
    for entry in entries {
        legacy.push(entry.street, entry.seat, entry.action.as_str());
    }
    legacy
}
