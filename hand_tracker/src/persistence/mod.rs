//! Persistence boundary.
//!
//! The core never stores anything itself. This module converts between the
//! canonical action sequence and the older per-street/per-seat layout, and
//! migrates persisted records written before the sequence existed.

pub mod legacy;
pub mod migration;

pub use legacy::{LegacySeatActions, to_legacy, to_sequence};
pub use migration::{TableRecord, migrate, needs_migration};
