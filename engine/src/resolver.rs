//! Damage formulas for attack and defense turns.
//!
//! Attack:  `base × (1 + pronunciation + complexity − reveal_penalty)`, unclamped.
//! Defense: `base × clamp(1 + pronunciation + complexity, 0.1, 1.0)`, or full
//! damage when the card was revealed.
//!
//! Sums and the clamp work in whole hundredths; the base value is multiplied
//! once, by the final multiplier, so damage bounds hold in plain f64.

use crate::policy;
use crate::tables::{self, Points};
use crate::{CombatActionResult, ComplexityLevel, ItemClass, Rating, TurnType};

/// Multiplier of an unmodified hit.
pub const NEUTRAL: Points = Points(100);
pub const DEFENSE_FLOOR: Points = Points(10);
pub const DEFENSE_CEILING: Points = Points(100);

/// Validated facts about one turn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnFacts {
    pub item_class: ItemClass,
    pub rating: Rating,
    pub level: ComplexityLevel,
    pub raw_score: f64,
    pub card_revealed: bool,
}

/// Per-term contributions before the base value is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakdown {
    pub turn_type: TurnType,
    pub pronunciation: Points,
    pub complexity: Points,
    pub reveal_penalty: Points,
    pub raw: Points,
    pub multiplier: Points,
    pub clamp_applied: bool,
    pub card_revealed: bool,
}

pub fn attack(facts: &TurnFacts) -> Breakdown {
    let (pronunciation, complexity) = policy::effective_bonuses(
        facts.card_revealed,
        tables::attack_pronunciation_bonus(facts.rating),
        policy::gate(facts.raw_score, tables::attack_complexity_bonus(facts.level)),
    );
    let reveal_penalty = policy::reveal_penalty(TurnType::Attack, facts.card_revealed);
    let raw = NEUTRAL + pronunciation + complexity - reveal_penalty;

    Breakdown {
        turn_type: TurnType::Attack,
        pronunciation,
        complexity,
        reveal_penalty,
        raw,
        multiplier: raw,
        clamp_applied: false,
        card_revealed: facts.card_revealed,
    }
}

pub fn defense(facts: &TurnFacts) -> Breakdown {
    let (pronunciation, complexity) = policy::effective_bonuses(
        facts.card_revealed,
        tables::defense_pronunciation_bonus(facts.item_class, facts.rating),
        policy::gate(facts.raw_score, tables::defense_complexity_bonus(facts.level)),
    );
    let raw = NEUTRAL + pronunciation + complexity;
    let (multiplier, clamp_applied) =
        if policy::forces_full_damage(TurnType::Defense, facts.card_revealed) {
            (NEUTRAL, false)
        } else {
            let clamped = clamp_multiplier(raw);
            (clamped, clamped != raw)
        };

    Breakdown {
        turn_type: TurnType::Defense,
        pronunciation,
        complexity,
        reveal_penalty: Points::ZERO,
        raw,
        multiplier,
        clamp_applied,
        card_revealed: facts.card_revealed,
    }
}

/// Hard floor and ceiling for the defense multiplier.
pub fn clamp_multiplier(raw: Points) -> Points {
    raw.clamp(DEFENSE_FLOOR, DEFENSE_CEILING)
}

/// `base × multiplier`, multiplying by the rounded fraction so that
/// `m >= 0.8` implies `base * m >= base * 0.8` in f64 as well.
pub fn scale(base_value: f64, multiplier: Points) -> f64 {
    base_value * multiplier.as_fraction()
}

impl Breakdown {
    pub fn into_result(self, base_value: f64) -> CombatActionResult {
        CombatActionResult {
            turn_type: self.turn_type,
            base_value,
            final_damage: scale(base_value, self.multiplier),
            multiplier: self.multiplier.as_fraction(),
            multiplier_points: self.multiplier.0,
            raw_multiplier: self.raw.as_fraction(),
            pronunciation_bonus: self.pronunciation.as_fraction(),
            complexity_bonus: self.complexity.as_fraction(),
            reveal_penalty: self.reveal_penalty.as_fraction(),
            reveal_penalty_applied: self.card_revealed,
            clamp_applied: self.clamp_applied,
        }
    }
}

fn signed(value: f64) -> String {
    if value < 0.0 {
        format!("− {:.2}", -value)
    } else {
        format!("+ {:.2}", value)
    }
}

impl CombatActionResult {
    /// Player-facing breakdown, e.g. `40 × (1.00 + 0.10 + 0.30) = 56.0`.
    pub fn formula(&self) -> String {
        match self.turn_type {
            TurnType::Attack => {
                let penalty = if self.reveal_penalty_applied {
                    format!(" {}", signed(-self.reveal_penalty))
                } else {
                    String::new()
                };
                format!(
                    "{} × (1.00 {} {}{}) = {:.1}",
                    self.base_value,
                    signed(self.pronunciation_bonus),
                    signed(self.complexity_bonus),
                    penalty,
                    self.final_damage
                )
            }
            TurnType::Defense if self.reveal_penalty_applied => format!(
                "{} × 1.00 (card revealed) = {:.1}",
                self.base_value, self.final_damage
            ),
            TurnType::Defense => format!(
                "{} × clamp(1.00 {} {}, {:.2}, {:.2}) = {:.1}",
                self.base_value,
                signed(self.pronunciation_bonus),
                signed(self.complexity_bonus),
                DEFENSE_FLOOR.as_fraction(),
                DEFENSE_CEILING.as_fraction(),
                self.final_damage
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facts(rating: Rating, level: ComplexityLevel, raw_score: f64, revealed: bool) -> TurnFacts {
        TurnFacts {
            item_class: ItemClass::Regular,
            rating,
            level,
            raw_score,
            card_revealed: revealed,
        }
    }

    #[test]
    fn attack_extremes() {
        let worst = attack(&facts(Rating::NeedsImprovement, ComplexityLevel::Five, 90.0, true));
        assert_eq!(worst.multiplier, Points(80));
        let best = attack(&facts(Rating::Excellent, ComplexityLevel::Five, 90.0, false));
        assert_eq!(best.multiplier, Points(220));
    }

    #[test]
    fn attack_gate_drops_only_complexity() {
        let b = attack(&facts(Rating::Good, ComplexityLevel::Four, 59.5, false));
        assert_eq!(b.pronunciation, Points(30));
        assert_eq!(b.complexity, Points::ZERO);
        assert_eq!(b.multiplier, Points(130));
    }

    #[test]
    fn revealed_defense_ignores_bonuses() {
        let mut f = facts(Rating::Excellent, ComplexityLevel::Five, 95.0, true);
        f.item_class = ItemClass::Special;
        let b = defense(&f);
        assert_eq!(b.multiplier, NEUTRAL);
        assert_eq!(b.pronunciation, Points::ZERO);
        assert_eq!(b.complexity, Points::ZERO);
        assert!(!b.clamp_applied);
    }

    #[test]
    fn clamp_holds_outside_reachable_range() {
        assert_eq!(clamp_multiplier(Points(-40)), DEFENSE_FLOOR);
        assert_eq!(clamp_multiplier(Points(5)), DEFENSE_FLOOR);
        assert_eq!(clamp_multiplier(Points(130)), DEFENSE_CEILING);
        assert_eq!(clamp_multiplier(Points(55)), Points(55));
    }

    #[test]
    fn scale_is_exact_for_whole_bases() {
        assert_eq!(scale(40.0, Points(140)), 56.0);
        assert_eq!(scale(15.0, Points(10)), 1.5);
        assert_eq!(scale(0.1, NEUTRAL), 0.1);
    }

    #[test]
    fn scaled_damage_respects_multiplier_bounds() {
        for base in 0..=2000 {
            let base = f64::from(base);
            assert!(scale(base, Points(80)) >= base * 0.8, "base {}", base);
            assert!(scale(base, DEFENSE_FLOOR) >= base * 0.1, "base {}", base);
            assert!(scale(base, Points(99)) <= base, "base {}", base);
        }
    }
}
