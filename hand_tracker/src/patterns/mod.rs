//! Read-only classification of primitive actions into poker patterns.
//!
//! Classifiers are pure functions of one entry, the full hand sequence and
//! the table geometry. They never touch [`crate::TableState`]; callers ask
//! for labels on demand.

use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::game::{
    entities::{ActionEntry, ParseError, Street},
    positions::TableGeometry,
};

pub mod postflop;
pub mod preflop;

pub use postflop::{PostflopClassifier, is_float_confirmed, live_seats_before, preflop_aggressor};
pub use preflop::PreflopClassifier;

/// Derived label for a single action.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Pattern {
    #[serde(rename = "fold")]
    Fold,
    #[serde(rename = "check")]
    Check,
    #[serde(rename = "call")]
    Call,
    #[serde(rename = "limp")]
    Limp,
    #[serde(rename = "over-limp")]
    OverLimp,
    #[serde(rename = "cold-call")]
    ColdCall,
    #[serde(rename = "open")]
    Open,
    #[serde(rename = "iso-raise")]
    IsoRaise,
    #[serde(rename = "3bet")]
    ThreeBet,
    #[serde(rename = "4bet")]
    FourBet,
    #[serde(rename = "5bet")]
    FiveBet,
    #[serde(rename = "squeeze")]
    Squeeze,
    #[serde(rename = "fold-to-cbet")]
    FoldToCbet,
    #[serde(rename = "fold-to-cr")]
    FoldToCheckRaise,
    #[serde(rename = "call-cbet")]
    CallCbet,
    #[serde(rename = "float-call")]
    FloatCall,
    #[serde(rename = "cbet-ip")]
    CbetInPosition,
    #[serde(rename = "cbet-oop")]
    CbetOutOfPosition,
    #[serde(rename = "probe")]
    Probe,
    #[serde(rename = "donk")]
    Donk,
    #[serde(rename = "stab")]
    Stab,
    #[serde(rename = "float-bet")]
    FloatBet,
    #[serde(rename = "bet")]
    Bet,
    #[serde(rename = "check-raise")]
    CheckRaise,
    #[serde(rename = "raise-vs-cbet")]
    RaiseVsCbet,
    #[serde(rename = "re-raise")]
    ReRaise,
}

impl Pattern {
    pub const ALL: [Pattern; 26] = [
        Self::Fold,
        Self::Check,
        Self::Call,
        Self::Limp,
        Self::OverLimp,
        Self::ColdCall,
        Self::Open,
        Self::IsoRaise,
        Self::ThreeBet,
        Self::FourBet,
        Self::FiveBet,
        Self::Squeeze,
        Self::FoldToCbet,
        Self::FoldToCheckRaise,
        Self::CallCbet,
        Self::FloatCall,
        Self::CbetInPosition,
        Self::CbetOutOfPosition,
        Self::Probe,
        Self::Donk,
        Self::Stab,
        Self::FloatBet,
        Self::Bet,
        Self::CheckRaise,
        Self::RaiseVsCbet,
        Self::ReRaise,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fold => "fold",
            Self::Check => "check",
            Self::Call => "call",
            Self::Limp => "limp",
            Self::OverLimp => "over-limp",
            Self::ColdCall => "cold-call",
            Self::Open => "open",
            Self::IsoRaise => "iso-raise",
            Self::ThreeBet => "3bet",
            Self::FourBet => "4bet",
            Self::FiveBet => "5bet",
            Self::Squeeze => "squeeze",
            Self::FoldToCbet => "fold-to-cbet",
            Self::FoldToCheckRaise => "fold-to-cr",
            Self::CallCbet => "call-cbet",
            Self::FloatCall => "float-call",
            Self::CbetInPosition => "cbet-ip",
            Self::CbetOutOfPosition => "cbet-oop",
            Self::Probe => "probe",
            Self::Donk => "donk",
            Self::Stab => "stab",
            Self::FloatBet => "float-bet",
            Self::Bet => "bet",
            Self::CheckRaise => "check-raise",
            Self::RaiseVsCbet => "raise-vs-cbet",
            Self::ReRaise => "re-raise",
        }
    }

    /// Bet- and raise-class labels.
    #[must_use]
    pub const fn is_aggressive(self) -> bool {
        matches!(
            self,
            Self::Open
                | Self::IsoRaise
                | Self::ThreeBet
                | Self::FourBet
                | Self::FiveBet
                | Self::Squeeze
                | Self::CbetInPosition
                | Self::CbetOutOfPosition
                | Self::Probe
                | Self::Donk
                | Self::Stab
                | Self::FloatBet
                | Self::Bet
                | Self::CheckRaise
                | Self::RaiseVsCbet
                | Self::ReRaise
        )
    }

    /// Check- and call-class labels. Folds are neither aggressive nor
    /// passive.
    #[must_use]
    pub const fn is_passive(self) -> bool {
        matches!(
            self,
            Self::Check
                | Self::Call
                | Self::Limp
                | Self::OverLimp
                | Self::ColdCall
                | Self::CallCbet
                | Self::FloatCall
        )
    }

    /// Labels that make the actor the preflop aggressor.
    #[must_use]
    pub const fn is_preflop_raise(self) -> bool {
        matches!(
            self,
            Self::Open
                | Self::IsoRaise
                | Self::ThreeBet
                | Self::FourBet
                | Self::FiveBet
                | Self::Squeeze
        )
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Pattern {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|pattern| pattern.as_str() == name)
            .ok_or_else(|| ParseError::UnknownPattern(s.to_string()))
    }
}

/// Name-level check for analytics callers holding wire names. Unknown names
/// are neither aggressive nor passive.
#[must_use]
pub fn is_aggressive_pattern(name: &str) -> bool {
    name.parse::<Pattern>().is_ok_and(Pattern::is_aggressive)
}

#[must_use]
pub fn is_passive_pattern(name: &str) -> bool {
    name.parse::<Pattern>().is_ok_and(Pattern::is_passive)
}

/// A street's classification rules.
#[enum_dispatch]
pub trait Classify {
    /// Label `entry` given the whole hand. `None` when the rules have
    /// nothing to say about the entry.
    fn classify(
        &self,
        entry: &ActionEntry,
        sequence: &[ActionEntry],
        geometry: &TableGeometry,
    ) -> Option<Pattern>;
}

/// Showdown holds no decisions worth labelling.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShowdownClassifier;

impl Classify for ShowdownClassifier {
    fn classify(&self, _: &ActionEntry, _: &[ActionEntry], _: &TableGeometry) -> Option<Pattern> {
        None
    }
}

/// Classifier selected by the street an entry was made on.
#[enum_dispatch(Classify)]
#[derive(Clone, Copy, Debug)]
pub enum StreetClassifier {
    Preflop(PreflopClassifier),
    Postflop(PostflopClassifier),
    Showdown(ShowdownClassifier),
}

impl From<Street> for StreetClassifier {
    fn from(street: Street) -> Self {
        match street {
            Street::Preflop => PreflopClassifier.into(),
            Street::Flop | Street::Turn | Street::River => PostflopClassifier.into(),
            Street::Showdown => ShowdownClassifier.into(),
        }
    }
}

/// Label one entry of `sequence`.
#[must_use]
pub fn classify(
    entry: &ActionEntry,
    sequence: &[ActionEntry],
    geometry: &TableGeometry,
) -> Option<Pattern> {
    StreetClassifier::from(entry.street).classify(entry, sequence, geometry)
}

/// An entry together with its label.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct ClassifiedAction {
    #[serde(flatten)]
    pub entry: ActionEntry,
    pub pattern: Option<Pattern>,
}

impl fmt::Display for ClassifiedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pattern {
            Some(pattern) => write!(f, "{} -> {pattern}", self.entry),
            None => write!(f, "{}", self.entry),
        }
    }
}

/// Label every entry of `sequence`, in order of the `order` field.
#[must_use]
pub fn classify_sequence(sequence: &[ActionEntry], geometry: &TableGeometry) -> Vec<ClassifiedAction> {
    let mut entries: Vec<&ActionEntry> = sequence.iter().collect();
    entries.sort_by_key(|entry| entry.order);
    entries
        .into_iter()
        .map(|entry| ClassifiedAction {
            entry: *entry,
            pattern: classify(entry, sequence, geometry),
        })
        .collect()
}

/// Entries on `entry`'s street that happened before it, in order.
fn earlier_on_street<'a>(entry: &ActionEntry, sequence: &'a [ActionEntry]) -> Vec<&'a ActionEntry> {
    let mut earlier: Vec<&ActionEntry> = sequence
        .iter()
        .filter(|other| other.street == entry.street && other.precedes(entry))
        .collect();
    earlier.sort_by_key(|other| other.order);
    earlier
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entities::PrimitiveAction;

    // === Pattern Tests ===

    #[test]
    fn test_pattern_names_roundtrip() {
        for pattern in Pattern::ALL {
            assert_eq!(pattern.to_string().parse::<Pattern>(), Ok(pattern));
        }
    }

    #[test]
    fn test_pattern_parse_unknown() {
        assert_eq!(
            "triple-barrel".parse::<Pattern>(),
            Err(ParseError::UnknownPattern("triple-barrel".to_string()))
        );
        assert_eq!(" 3BET ".parse::<Pattern>(), Ok(Pattern::ThreeBet));
    }

    #[test]
    fn test_pattern_serde_uses_wire_names() {
        assert_eq!(serde_json::to_string(&Pattern::FoldToCheckRaise).unwrap(), r#""fold-to-cr""#);
        let parsed: Pattern = serde_json::from_str(r#""cbet-oop""#).unwrap();
        assert_eq!(parsed, Pattern::CbetOutOfPosition);
    }

    #[test]
    fn test_partition_is_disjoint() {
        for pattern in Pattern::ALL {
            assert!(!(pattern.is_aggressive() && pattern.is_passive()), "{pattern}");
        }
    }

    #[test]
    fn test_partition_membership() {
        assert!(is_aggressive_pattern("3bet"));
        assert!(is_aggressive_pattern("cbet-ip"));
        assert!(is_aggressive_pattern("check-raise"));
        assert!(is_passive_pattern("limp"));
        assert!(is_passive_pattern("float-call"));
        assert!(is_passive_pattern("check"));
        assert!(!is_aggressive_pattern("fold-to-cbet"));
        assert!(!is_passive_pattern("fold-to-cbet"));
        assert!(!is_aggressive_pattern("not-a-pattern"));
        assert!(!is_passive_pattern("not-a-pattern"));
    }

    #[test]
    fn test_preflop_raise_subset_of_aggressive() {
        for pattern in Pattern::ALL.into_iter().filter(|p| p.is_preflop_raise()) {
            assert!(pattern.is_aggressive());
        }
    }

    // === Dispatch Tests ===

    #[test]
    fn test_showdown_has_no_pattern() {
        let entry = ActionEntry::new(3, PrimitiveAction::Call, Street::Showdown, 1);
        assert_eq!(classify(&entry, &[entry], &TableGeometry::default()), None);
    }

    #[test]
    fn test_classify_sequence_follows_order() {
        let sequence = [
            ActionEntry::new(1, PrimitiveAction::Raise, Street::Preflop, 2),
            ActionEntry::new(4, PrimitiveAction::Raise, Street::Preflop, 1),
        ];
        let classified = classify_sequence(&sequence, &TableGeometry::default());
        let labels: Vec<_> = classified.iter().map(|c| (c.entry.seat, c.pattern)).collect();
        assert_eq!(
            labels,
            vec![(4, Some(Pattern::Open)), (1, Some(Pattern::ThreeBet))]
        );
        assert_eq!(classified[1].to_string(), "#2 preflop seat 1 raise -> 3bet");
    }
}
