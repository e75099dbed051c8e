use super::{
    entities::{PrimitiveAction, Seat, Street},
    state_machine::{ActionOutcome, RejectReason, SavedTableState, TableState, Transition},
    validation,
};
use crate::config::TrackerConfig;

/// Single authoritative owner of a hand's [`TableState`].
///
/// Every write goes through the schema-checked transition function. On
/// `Err` the owned state is untouched, so UI callers can ignore the result
/// while importers and tests can branch on the [`RejectReason`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableStore {
    state: TableState,
}

impl From<&TrackerConfig> for TableStore {
    fn from(config: &TrackerConfig) -> Self {
        Self::new(TableState::from(config))
    }
}

impl TableStore {
    #[must_use]
    pub const fn new(state: TableState) -> Self {
        Self { state }
    }

    #[must_use]
    pub const fn state(&self) -> &TableState {
        &self.state
    }

    #[must_use]
    pub fn into_state(self) -> TableState {
        self.state
    }

    pub fn dispatch(&mut self, transition: &Transition) -> Result<(), RejectReason> {
        match validation::apply(&self.state, transition) {
            ActionOutcome::Applied(next) => {
                self.state = next;
                Ok(())
            }
            ActionOutcome::Rejected { reason, .. } => Err(reason),
        }
    }

    /// Record `action` (a primitive name) for each seat in `seats`.
    pub fn record_action(&mut self, seats: &[Seat], action: &str) -> Result<(), RejectReason> {
        self.dispatch(&Transition::RecordAction {
            seats: seats.to_vec(),
            action: action.to_string(),
        })
    }

    pub fn record(&mut self, seats: &[Seat], action: PrimitiveAction) -> Result<(), RejectReason> {
        self.dispatch(&Transition::record(seats, action))
    }

    pub fn set_street(&mut self, street: Street) -> Result<(), RejectReason> {
        self.dispatch(&Transition::SetStreet { street })
    }

    pub fn advance_street(&mut self) -> Result<(), RejectReason> {
        self.dispatch(&Transition::AdvanceStreet)
    }

    pub fn set_button(&mut self, seat: Seat) -> Result<(), RejectReason> {
        self.dispatch(&Transition::SetButton { seat })
    }

    pub fn advance_button(&mut self) -> Result<(), RejectReason> {
        self.dispatch(&Transition::AdvanceButton)
    }

    pub fn set_my_seat(&mut self, seat: Option<Seat>) -> Result<(), RejectReason> {
        self.dispatch(&Transition::SetMySeat { seat })
    }

    /// Remove `seat`'s latest entry on the current street.
    pub fn undo_last(&mut self, seat: Seat) -> Result<(), RejectReason> {
        self.dispatch(&Transition::UndoLast { seat: Some(seat) })
    }

    /// Remove the latest entry of the hand, whoever made it.
    pub fn undo_latest(&mut self) -> Result<(), RejectReason> {
        self.dispatch(&Transition::UndoLast { seat: None })
    }

    pub fn toggle_absent(&mut self, seats: &[Seat]) -> Result<(), RejectReason> {
        self.dispatch(&Transition::ToggleAbsent {
            seats: seats.to_vec(),
        })
    }

    pub fn clear_street_actions(&mut self) -> Result<(), RejectReason> {
        self.dispatch(&Transition::ClearStreetActions)
    }

    pub fn clear_seat_actions(&mut self, seats: &[Seat]) -> Result<(), RejectReason> {
        self.dispatch(&Transition::ClearSeatActions {
            seats: seats.to_vec(),
        })
    }

    pub fn reset_hand(&mut self) -> Result<(), RejectReason> {
        self.dispatch(&Transition::ResetHand)
    }

    pub fn next_hand(&mut self) -> Result<(), RejectReason> {
        self.dispatch(&Transition::NextHand)
    }

    pub fn hydrate(&mut self, saved: SavedTableState) -> Result<(), RejectReason> {
        self.dispatch(&Transition::Hydrate { saved })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::validation::SchemaViolation;

    #[test]
    fn test_store_from_config() {
        let config = TrackerConfig {
            seat_count: 6,
            button_seat: 4,
        };
        let store = TableStore::from(&config);
        assert_eq!(store.state().seat_count, 6);
        assert_eq!(store.state().button_seat, 4);
    }

    #[test]
    fn test_dispatch_applies() {
        let mut store = TableStore::default();
        store.record(&[4], PrimitiveAction::Raise).unwrap();
        store.advance_street().unwrap();
        assert_eq!(store.state().action_sequence.len(), 1);
        assert_eq!(store.state().current_street, Street::Flop);
    }

    #[test]
    fn test_rejection_leaves_state_untouched() {
        let mut store = TableStore::default();
        store.record_action(&[2, 3], "call").unwrap();
        let before = store.clone();

        let err = store.record_action(&[3], "not_a_real_action").unwrap_err();
        assert_eq!(err, RejectReason::UnknownAction("not_a_real_action".to_string()));
        assert_eq!(store, before);
    }

    #[test]
    fn test_hydrate_schema_violation_rolls_back() {
        let mut store = TableStore::default();
        let saved = SavedTableState {
            button_seat: Some(15),
            ..SavedTableState::default()
        };
        let err = store.hydrate(saved).unwrap_err();
        assert!(matches!(
            err,
            RejectReason::Schema(SchemaViolation::ButtonSeat { seat: 15, .. })
        ));
        assert_eq!(store.state(), &TableState::default());
    }

    #[test]
    fn test_hydrate_seat_count_revalidates_button() {
        let mut store = TableStore::new(TableState::new(9, 8));
        let saved = SavedTableState {
            seat_count: Some(6),
            ..SavedTableState::default()
        };
        assert!(store.hydrate(saved).is_err());
        assert_eq!(store.state().seat_count, 9);
    }

    #[test]
    fn test_next_hand_cycle() {
        let mut store = TableStore::new(TableState::new(6, 6));
        store.toggle_absent(&[3]).unwrap();
        store.next_hand().unwrap();
        assert_eq!(store.state().button_seat, 1);
        assert!(store.state().absent_seats.contains(&3));
        store.reset_hand().unwrap();
        assert_eq!(store.state().button_seat, 1);
        assert!(store.state().absent_seats.is_empty());
    }
}
