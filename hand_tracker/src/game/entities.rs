use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Type alias for 1-based seat numbers. A seat is valid for a table of `N`
/// seats when it lies in `[1, N]`.
pub type Seat = usize;

/// Errors produced when parsing wire names into entities.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ParseError {
    #[error("unknown street: {0}")]
    UnknownStreet(String),
    #[error("unknown action: {0}")]
    UnknownAction(String),
    #[error("unknown pattern: {0}")]
    UnknownPattern(String),
}

/// Betting rounds plus the terminal showdown phase, in dealing order.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Street {
    #[default]
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Street {
    pub const ALL: [Street; 5] = [
        Self::Preflop,
        Self::Flop,
        Self::Turn,
        Self::River,
        Self::Showdown,
    ];

    /// Streets on which players make decisions.
    pub const BETTING: [Street; 4] = [Self::Preflop, Self::Flop, Self::Turn, Self::River];

    /// The following street. Showdown is terminal and maps to itself.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Preflop => Self::Flop,
            Self::Flop => Self::Turn,
            Self::Turn => Self::River,
            Self::River | Self::Showdown => Self::Showdown,
        }
    }

    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::Preflop => None,
            Self::Flop => Some(Self::Preflop),
            Self::Turn => Some(Self::Flop),
            Self::River => Some(Self::Turn),
            Self::Showdown => Some(Self::River),
        }
    }

    #[must_use]
    pub const fn is_postflop_betting(self) -> bool {
        matches!(self, Self::Flop | Self::Turn | Self::River)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Preflop => "preflop",
            Self::Flop => "flop",
            Self::Turn => "turn",
            Self::River => "river",
            Self::Showdown => "showdown",
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Street {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|street| street.as_str() == name)
            .ok_or_else(|| ParseError::UnknownStreet(s.to_string()))
    }
}

/// The only decisions the table ever stores. Everything richer (3bet,
/// cbet-ip, donk, ...) is derived from these by the pattern classifiers.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveAction {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
}

// Older records stored display names instead of primitives. Names missing
// from this table are unrecognized and get filtered out during conversion.
const LEGACY_VOCABULARY: &[(&str, PrimitiveAction)] = &[
    ("fold", PrimitiveAction::Fold),
    ("fold-to-cbet", PrimitiveAction::Fold),
    ("fold-to-cr", PrimitiveAction::Fold),
    ("check", PrimitiveAction::Check),
    ("call", PrimitiveAction::Call),
    ("limp", PrimitiveAction::Call),
    ("over-limp", PrimitiveAction::Call),
    ("cold-call", PrimitiveAction::Call),
    ("call-cbet", PrimitiveAction::Call),
    ("float-call", PrimitiveAction::Call),
    ("bet", PrimitiveAction::Bet),
    ("cbet", PrimitiveAction::Bet),
    ("cbet-ip", PrimitiveAction::Bet),
    ("cbet-oop", PrimitiveAction::Bet),
    ("donk", PrimitiveAction::Bet),
    ("probe", PrimitiveAction::Bet),
    ("stab", PrimitiveAction::Bet),
    ("float-bet", PrimitiveAction::Bet),
    ("raise", PrimitiveAction::Raise),
    ("open", PrimitiveAction::Raise),
    ("iso-raise", PrimitiveAction::Raise),
    ("3bet", PrimitiveAction::Raise),
    ("4bet", PrimitiveAction::Raise),
    ("5bet", PrimitiveAction::Raise),
    ("squeeze", PrimitiveAction::Raise),
    ("check-raise", PrimitiveAction::Raise),
    ("raise-vs-cbet", PrimitiveAction::Raise),
    ("re-raise", PrimitiveAction::Raise),
];

impl PrimitiveAction {
    pub const ALL: [PrimitiveAction; 5] = [
        Self::Fold,
        Self::Check,
        Self::Call,
        Self::Bet,
        Self::Raise,
    ];

    /// Map a legacy or display action name onto a primitive.
    ///
    /// Returns `None` for names outside the vocabulary, including showdown
    /// outcome markers such as `won` or `mucked`.
    #[must_use]
    pub fn from_legacy(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        LEGACY_VOCABULARY
            .iter()
            .find(|(legacy, _)| *legacy == name)
            .map(|(_, action)| *action)
    }

    /// Bets and raises put new money in and reopen the action.
    #[must_use]
    pub const fn is_aggressive(self) -> bool {
        matches!(self, Self::Bet | Self::Raise)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fold => "fold",
            Self::Check => "check",
            Self::Call => "call",
            Self::Bet => "bet",
            Self::Raise => "raise",
        }
    }
}

impl fmt::Display for PrimitiveAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Strict parse: only the five primitive names are accepted. Use
/// [`PrimitiveAction::from_legacy`] for display aliases.
impl FromStr for PrimitiveAction {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == name)
            .ok_or_else(|| ParseError::UnknownAction(s.to_string()))
    }
}

/// One decision in the hand's action log.
///
/// `order` is global across the whole hand and is the only tie-breaker for
/// what happened first.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct ActionEntry {
    pub seat: Seat,
    pub action: PrimitiveAction,
    pub street: Street,
    pub order: u32,
}

impl ActionEntry {
    #[must_use]
    pub const fn new(seat: Seat, action: PrimitiveAction, street: Street, order: u32) -> Self {
        Self {
            seat,
            action,
            street,
            order,
        }
    }

    /// Whether `self` happened strictly before `other`.
    #[must_use]
    pub const fn precedes(&self, other: &ActionEntry) -> bool {
        self.order < other.order
    }
}

impl fmt::Display for ActionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} seat {} {}",
            self.order, self.street, self.seat, self.action
        )
    }
}

/// Named table positions, clockwise from the button.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Position {
    #[serde(rename = "BTN")]
    Button,
    #[serde(rename = "SB")]
    SmallBlind,
    #[serde(rename = "BB")]
    BigBlind,
    #[serde(rename = "UTG")]
    UnderTheGun,
    #[serde(rename = "UTG+1")]
    UnderTheGun1,
    #[serde(rename = "UTG+2")]
    UnderTheGun2,
    #[serde(rename = "MP")]
    Middle,
    #[serde(rename = "MP1")]
    Middle1,
    #[serde(rename = "MP2")]
    Middle2,
    #[serde(rename = "HJ")]
    Hijack,
    #[serde(rename = "CO")]
    Cutoff,
    Unknown,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Button => "BTN",
            Self::SmallBlind => "SB",
            Self::BigBlind => "BB",
            Self::UnderTheGun => "UTG",
            Self::UnderTheGun1 => "UTG+1",
            Self::UnderTheGun2 => "UTG+2",
            Self::Middle => "MP",
            Self::Middle1 => "MP1",
            Self::Middle2 => "MP2",
            Self::Hijack => "HJ",
            Self::Cutoff => "CO",
            Self::Unknown => "Unknown",
        };
        write!(f, "{repr}")
    }
}
