//! Migration of persisted table records to the sequence layout.

use log::debug;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;

use super::legacy::{LegacySeatActions, to_sequence};
use crate::game::{entities::ActionEntry, state_machine::SavedTableState};

const SEAT_ACTIONS_FIELD: &str = "seatActions";
const ACTION_SEQUENCE_FIELD: &str = "actionSequence";

/// A persisted table record as the storage layer hands it over.
///
/// Only the fields migration cares about are typed; everything else is kept
/// verbatim in `extra` and written back untouched.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRecord {
    /// Legacy map at the top level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seat_actions: Option<Value>,
    /// Older records nest the legacy map as `gameState.seatActions`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_state: Option<Value>,
    /// Read leniently: entries that don't parse are dropped, and a value
    /// that isn't an array reads as absent.
    #[serde(
        default,
        deserialize_with = "lenient_sequence",
        skip_serializing_if = "Option::is_none"
    )]
    pub action_sequence: Option<Vec<ActionEntry>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TableRecord {
    /// The legacy map migration reads from: the top-level one when it is
    /// non-empty, otherwise the nested one.
    #[must_use]
    pub fn legacy_source(&self) -> Option<&Value> {
        let nested = self
            .game_state
            .as_ref()
            .and_then(|state| state.get(SEAT_ACTIONS_FIELD));
        [self.seat_actions.as_ref(), nested]
            .into_iter()
            .flatten()
            .find(|value| is_non_empty_map(value))
    }

    /// Hydration payload for this record, migrating it first if needed.
    pub fn saved_state(&self) -> Result<SavedTableState, serde_json::Error> {
        let record = migrate(self);
        let mut fields = record.extra.clone();
        if let Some(sequence) = &record.action_sequence {
            fields.insert(
                ACTION_SEQUENCE_FIELD.to_string(),
                serde_json::to_value(sequence)?,
            );
        }
        serde_json::from_value(Value::Object(fields))
    }
}

fn lenient_sequence<'de, D>(deserializer: D) -> Result<Option<Vec<ActionEntry>>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Option::<Value>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(Value::Array(items)) => items,
        Some(other) => {
            debug!("ignoring non-array {ACTION_SEQUENCE_FIELD}: {other}");
            return Ok(None);
        }
    };

    let sequence = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<ActionEntry>(item.clone()) {
            Ok(entry) => Some(entry),
            Err(err) => {
                debug!("dropping {ACTION_SEQUENCE_FIELD} entry {item}: {err}");
                None
            }
        })
        .collect();
    Ok(Some(sequence))
}

fn is_non_empty_map(value: &Value) -> bool {
    value.as_object().is_some_and(|map| !map.is_empty())
}

/// True when the record carries a non-empty legacy map and no non-empty
/// sequence. An empty sequence array still needs migrating.
#[must_use]
pub fn needs_migration(record: &TableRecord) -> bool {
    record.legacy_source().is_some() && record.action_sequence.as_ref().is_none_or(Vec::is_empty)
}

/// Build the action sequence for a legacy record.
///
/// Idempotent: a record that doesn't need migrating, or whose legacy map
/// yields no recognizable entries, is returned borrowed and unchanged.
/// Otherwise a copy is returned with `actionSequence` filled in and every
/// other field preserved.
#[must_use]
pub fn migrate(record: &TableRecord) -> Cow<'_, TableRecord> {
    let Some(source) = record.legacy_source().filter(|_| needs_migration(record)) else {
        return Cow::Borrowed(record);
    };

    let sequence = to_sequence(&LegacySeatActions::from_value(source));
    if sequence.is_empty() {
        // An empty sequence still counts as unmigrated.
        debug!("legacy seat actions held no recognizable entries");
        return Cow::Borrowed(record);
    }
    debug!("migrated legacy seat actions into {} entries", sequence.len());

    let mut migrated = record.clone();
    migrated.action_sequence = Some(sequence);
    Cow::Owned(migrated)
}
