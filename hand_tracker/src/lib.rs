//! # Hand Tracker
//!
//! Live poker hand tracking built around a single ordered action log.
//!
//! The table records primitive decisions (`fold`, `check`, `call`, `bet`,
//! `raise`) per seat and street. Richer tactical labels such as `3bet`,
//! `squeeze`, `cbet-ip`, `donk` or `check-raise` are derived on demand from
//! that log and the table geometry, and are never stored.
//!
//! ## Core Modules
//!
//! - [`game`]: Entities, position utilities, the table state machine, its
//!   schema validation layer and the owning [`TableStore`]
//! - [`patterns`]: Read-only preflop/postflop pattern classifiers
//! - [`persistence`]: Conversion between the action sequence and the older
//!   per-street/per-seat layout, plus record migration
//! - [`config`]: Table configuration loaded from the environment
//!
//! ## Example
//!
//! ```
//! use hand_tracker::{TableStore, patterns::{self, Pattern}};
//!
//! let mut store = TableStore::default();
//! store.record_action(&[4], "raise").unwrap();
//! store.record_action(&[1], "raise").unwrap();
//!
//! let state = store.state();
//! let geometry = state.geometry();
//! let last = state.action_sequence.last().unwrap();
//! assert_eq!(
//!     patterns::classify(last, &state.action_sequence, &geometry),
//!     Some(Pattern::ThreeBet)
//! );
//! ```

/// Table configuration.
pub mod config;

/// Table entities, positions and the action-sequence state machine.
pub mod game;

/// Tactical pattern classification over the action sequence.
pub mod patterns;

/// Legacy layout conversion and persisted record migration.
pub mod persistence;

pub use config::{ConfigError, TrackerConfig};
pub use game::{
    ActionOutcome, RejectReason, SavedTableState, TableState, TableStore, Transition,
    constants::{DEFAULT_SEAT_COUNT, MAX_SEATS, MIN_SEATS},
    entities::{ActionEntry, Position, PrimitiveAction, Seat, Street},
    positions::TableGeometry,
};
pub use patterns::{ClassifiedAction, Pattern, classify, classify_sequence};
pub use persistence::{LegacySeatActions, TableRecord, migrate, needs_migration};
