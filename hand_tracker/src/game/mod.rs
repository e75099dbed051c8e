//! Table core: entities, positions and the action-sequence state machine.
//!
//! This module provides:
//! - The primitive action vocabulary and street/seat entities
//! - Position utilities derived from the button seat and seat count
//! - The table state machine and its transitions
//! - A schema validation layer that rolls back structurally invalid states
//! - [`TableStore`], the single owner of a hand's state

pub mod constants;
pub mod entities;
pub mod positions;
pub mod state_machine;
pub mod store;
pub mod validation;

pub use state_machine::{ActionOutcome, RejectReason, SavedTableState, TableState, Transition};
pub use store::TableStore;
pub use validation::SchemaViolation;
