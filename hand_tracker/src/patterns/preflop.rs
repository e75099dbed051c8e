use super::{Classify, Pattern, earlier_on_street};
use crate::game::{
    entities::{ActionEntry, PrimitiveAction, Street},
    positions::TableGeometry,
};

/// Preflop rules: raise counting, limper tracking and squeezes.
#[derive(Clone, Copy, Debug, Default)]
pub struct PreflopClassifier;

/// What happened preflop before the entry being labelled.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
struct PreflopFacts {
    /// Bets and raises. A preflop bet counts as the opening raise.
    raises: usize,
    /// Calls made before the first raise.
    limpers: usize,
    /// Calls made after the most recent raise.
    callers_since_raise: usize,
    /// The acting seat already has an entry this street.
    seat_has_acted: bool,
}

impl PreflopFacts {
    fn gather(entry: &ActionEntry, earlier: &[&ActionEntry]) -> Self {
        let mut facts = Self::default();
        for prior in earlier {
            match prior.action {
                PrimitiveAction::Bet | PrimitiveAction::Raise => {
                    facts.raises += 1;
                    facts.callers_since_raise = 0;
                }
                PrimitiveAction::Call if facts.raises == 0 => facts.limpers += 1,
                PrimitiveAction::Call => facts.callers_since_raise += 1,
                PrimitiveAction::Fold | PrimitiveAction::Check => {}
            }
            facts.seat_has_acted |= prior.seat == entry.seat;
        }
        facts
    }
}

impl Classify for PreflopClassifier {
    fn classify(
        &self,
        entry: &ActionEntry,
        sequence: &[ActionEntry],
        _geometry: &TableGeometry,
    ) -> Option<Pattern> {
        if entry.street != Street::Preflop {
            return None;
        }
        let facts = PreflopFacts::gather(entry, &earlier_on_street(entry, sequence));
        Some(label(entry.action, facts))
    }
}

fn label(action: PrimitiveAction, facts: PreflopFacts) -> Pattern {
    use PrimitiveAction as A;

    match (action, facts.raises) {
        (A::Fold, _) => Pattern::Fold,
        (A::Check, _) => Pattern::Check,
        (A::Call, 0) if facts.limpers == 0 => Pattern::Limp,
        (A::Call, 0) => Pattern::OverLimp,
        (A::Call, _) if !facts.seat_has_acted => Pattern::ColdCall,
        (A::Call, _) => Pattern::Call,
        (A::Raise, 0) if facts.limpers > 0 => Pattern::IsoRaise,
        (A::Raise, 0) | (A::Bet, _) => Pattern::Open,
        (A::Raise, 1) if facts.callers_since_raise > 0 => Pattern::Squeeze,
        (A::Raise, 1) => Pattern::ThreeBet,
        (A::Raise, 2) => Pattern::FourBet,
        (A::Raise, _) => Pattern::FiveBet,
    }
}
