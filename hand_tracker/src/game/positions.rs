//! Seat-to-position mapping and acting order.
//!
//! Every position question is answered from two numbers: how many seats the
//! table has and which seat holds the button. Seats are 1-based and wrap
//! clockwise, so the seat after `N` is `1`.

use serde::{Deserialize, Serialize};

use super::{
    constants::{DEFAULT_BUTTON_SEAT, DEFAULT_SEAT_COUNT, MAX_SEATS, MIN_SEATS},
    entities::{Position, Seat},
};

use Position::{
    BigBlind as BB, Button as BTN, Cutoff as CO, Hijack as HJ, Middle as MP, Middle1 as MP1,
    Middle2 as MP2, SmallBlind as SB, UnderTheGun as UTG, UnderTheGun1 as UTG1,
    UnderTheGun2 as UTG2,
};

/// Clockwise position names starting at the button, indexed by seat count.
/// Late positions (CO, HJ) are named first as tables shrink.
const POSITION_TABLES: [&[Position]; MAX_SEATS + 1] = [
    &[],
    &[],
    &[BTN, BB],
    &[BTN, SB, BB],
    &[BTN, SB, BB, CO],
    &[BTN, SB, BB, UTG, CO],
    &[BTN, SB, BB, UTG, HJ, CO],
    &[BTN, SB, BB, UTG, MP, HJ, CO],
    &[BTN, SB, BB, UTG, UTG1, MP, HJ, CO],
    &[BTN, SB, BB, UTG, UTG1, MP1, MP2, HJ, CO],
    &[BTN, SB, BB, UTG, UTG1, UTG2, MP1, MP2, HJ, CO],
];

/// Table geometry: seat count plus the button seat.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableGeometry {
    pub seat_count: usize,
    pub button_seat: Seat,
}

impl Default for TableGeometry {
    fn default() -> Self {
        Self::new(DEFAULT_SEAT_COUNT, DEFAULT_BUTTON_SEAT)
    }
}

impl TableGeometry {
    #[must_use]
    pub const fn new(seat_count: usize, button_seat: Seat) -> Self {
        Self {
            seat_count,
            button_seat,
        }
    }

    /// Whether the seat count is one the position tables cover.
    #[must_use]
    pub const fn is_supported(&self) -> bool {
        self.seat_count >= MIN_SEATS && self.seat_count <= MAX_SEATS
    }

    #[must_use]
    pub const fn contains(&self, seat: Seat) -> bool {
        seat >= 1 && seat <= self.seat_count
    }

    /// The seat `steps` places clockwise from `seat`.
    #[must_use]
    pub const fn seat_after(&self, seat: Seat, steps: usize) -> Seat {
        if self.seat_count == 0 {
            return seat;
        }
        (seat + steps + self.seat_count - 1) % self.seat_count + 1
    }

    /// Clockwise distance from the button to `seat`: BTN=0, SB=1, BB=2, ...
    fn offset_from_button(&self, seat: Seat) -> Option<usize> {
        if !self.is_supported() || !self.contains(seat) || !self.contains(self.button_seat) {
            return None;
        }
        Some((seat + self.seat_count - self.button_seat) % self.seat_count)
    }

    /// Position name of `seat`, or [`Position::Unknown`] for any out-of-range
    /// seat, button or seat count.
    #[must_use]
    pub fn position_name(&self, seat: Seat) -> Position {
        self.offset_from_button(seat)
            .and_then(|offset| POSITION_TABLES[self.seat_count].get(offset).copied())
            .unwrap_or(Position::Unknown)
    }

    /// Postflop acting rank: the first seat after the button acts first
    /// (rank 0) and the button acts last (rank N-1).
    #[must_use]
    pub fn postflop_rank(&self, seat: Seat) -> Option<usize> {
        self.offset_from_button(seat)
            .map(|offset| (offset + self.seat_count - 1) % self.seat_count)
    }

    /// Whether `my_seat` acts strictly after `opponent_seat` postflop.
    #[must_use]
    pub fn is_in_position(&self, my_seat: Seat, opponent_seat: Seat) -> bool {
        match (self.postflop_rank(my_seat), self.postflop_rank(opponent_seat)) {
            (Some(mine), Some(theirs)) => mine > theirs,
            _ => false,
        }
    }

    /// Whether `my_seat` acts strictly before `opponent_seat` postflop.
    #[must_use]
    pub fn is_out_of_position(&self, my_seat: Seat, opponent_seat: Seat) -> bool {
        match (self.postflop_rank(my_seat), self.postflop_rank(opponent_seat)) {
            (Some(mine), Some(theirs)) => mine < theirs,
            _ => false,
        }
    }

    /// All seats in preflop acting order, starting at UTG (three seats after
    /// the button). Heads-up the button posts the small blind and acts first.
    #[must_use]
    pub fn preflop_order(&self) -> Vec<Seat> {
        let start = if self.seat_count == 2 { 0 } else { 3 };
        self.order_from(start)
    }

    /// All seats in postflop acting order, starting one seat after the button.
    #[must_use]
    pub fn postflop_order(&self) -> Vec<Seat> {
        self.order_from(1)
    }

    fn order_from(&self, steps_after_button: usize) -> Vec<Seat> {
        if !self.is_supported() || !self.contains(self.button_seat) {
            return Vec::new();
        }
        let first = self.seat_after(self.button_seat, steps_after_button);
        (0..self.seat_count)
            .map(|i| self.seat_after(first, i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nine_max(button: Seat) -> TableGeometry {
        TableGeometry::new(9, button)
    }

    // === Position Name Tests ===

    #[test]
    fn test_position_names_nine_max() {
        let table = nine_max(1);
        let names: Vec<String> = (1..=9)
            .map(|seat| table.position_name(seat).to_string())
            .collect();
        assert_eq!(
            names,
            ["BTN", "SB", "BB", "UTG", "UTG+1", "MP1", "MP2", "HJ", "CO"]
        );
    }

    #[test]
    fn test_position_names_wrap_around_button() {
        let table = nine_max(8);
        assert_eq!(table.position_name(8), Position::Button);
        assert_eq!(table.position_name(9), Position::SmallBlind);
        assert_eq!(table.position_name(1), Position::BigBlind);
        assert_eq!(table.position_name(2), Position::UnderTheGun);
        assert_eq!(table.position_name(7), Position::Cutoff);
    }

    #[test]
    fn test_position_name_out_of_range() {
        let table = nine_max(1);
        assert_eq!(table.position_name(0), Position::Unknown);
        assert_eq!(table.position_name(10), Position::Unknown);
        assert_eq!(nine_max(0).position_name(3), Position::Unknown);
        assert_eq!(nine_max(12).position_name(3), Position::Unknown);
    }

    #[test]
    fn test_position_name_unsupported_seat_count() {
        let table = TableGeometry::new(11, 1);
        assert_eq!(table.position_name(1), Position::Unknown);
    }

    #[test]
    fn test_every_table_size_is_fully_named() {
        for seats in MIN_SEATS..=MAX_SEATS {
            let table = TableGeometry::new(seats, 1);
            assert_eq!(POSITION_TABLES[seats].len(), seats);
            for seat in 1..=seats {
                assert_ne!(table.position_name(seat), Position::Unknown);
            }
        }
    }

    #[test]
    fn test_six_max_names() {
        let table = TableGeometry::new(6, 3);
        assert_eq!(table.position_name(3), Position::Button);
        assert_eq!(table.position_name(6), Position::UnderTheGun);
        assert_eq!(table.position_name(1), Position::Hijack);
        assert_eq!(table.position_name(2), Position::Cutoff);
    }

    // === In Position Tests ===

    #[test]
    fn test_button_in_position_against_blinds() {
        let table = nine_max(5);
        assert!(table.is_in_position(5, 6));
        assert!(table.is_in_position(5, 7));
        assert!(table.is_out_of_position(6, 5));
    }

    #[test]
    fn test_in_position_wraps_seat_numbers() {
        // Button on 8: seat 2 is UTG, seat 7 is CO
        let table = nine_max(8);
        assert!(table.is_in_position(7, 2));
        assert!(table.is_out_of_position(2, 7));
        assert!(table.is_out_of_position(9, 1));
    }

    #[test]
    fn test_same_seat_is_neither() {
        let table = nine_max(1);
        assert!(!table.is_in_position(4, 4));
        assert!(!table.is_out_of_position(4, 4));
    }

    #[test]
    fn test_in_position_invalid_seats() {
        let table = nine_max(1);
        assert!(!table.is_in_position(0, 4));
        assert!(!table.is_out_of_position(4, 10));
    }

    // === Acting Order Tests ===

    #[test]
    fn test_preflop_order_starts_utg() {
        assert_eq!(nine_max(1).preflop_order(), vec![4, 5, 6, 7, 8, 9, 1, 2, 3]);
        assert_eq!(nine_max(8).preflop_order(), vec![2, 3, 4, 5, 6, 7, 8, 9, 1]);
    }

    #[test]
    fn test_postflop_order_starts_sb() {
        assert_eq!(nine_max(1).postflop_order(), vec![2, 3, 4, 5, 6, 7, 8, 9, 1]);
        assert_eq!(nine_max(9).postflop_order(), vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_heads_up_orders() {
        let table = TableGeometry::new(2, 1);
        assert_eq!(table.preflop_order(), vec![1, 2]);
        assert_eq!(table.postflop_order(), vec![2, 1]);
        assert!(table.is_in_position(1, 2));
    }

    #[test]
    fn test_three_handed_button_opens() {
        let table = TableGeometry::new(3, 2);
        assert_eq!(table.preflop_order(), vec![2, 3, 1]);
    }

    #[test]
    fn test_order_invalid_button_is_empty() {
        assert!(nine_max(0).preflop_order().is_empty());
        assert!(nine_max(10).postflop_order().is_empty());
    }

    #[test]
    fn test_postflop_rank() {
        let table = nine_max(1);
        assert_eq!(table.postflop_rank(2), Some(0));
        assert_eq!(table.postflop_rank(1), Some(8));
        assert_eq!(table.postflop_rank(11), None);
    }
}
