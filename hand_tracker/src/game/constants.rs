use super::entities::Seat;

/// Seat count used when nothing else is configured.
pub const DEFAULT_SEAT_COUNT: usize = 9;

/// Smallest table the position tables cover (heads-up).
pub const MIN_SEATS: usize = 2;

/// Largest table the position tables cover.
pub const MAX_SEATS: usize = 10;

/// Seat holding the button on a freshly created table.
pub const DEFAULT_BUTTON_SEAT: Seat = 1;

/// First `order` value assigned in a hand.
pub const FIRST_ORDER: u32 = 1;
