//! Gating and card-reveal rules. Both are independent filters applied after
//! the table lookup.

use crate::TurnType;
use crate::tables::Points;

/// Minimum raw score (inclusive) for the complexity bonus to count.
pub const GATING_THRESHOLD: f64 = 60.0;

/// Subtracted from the attack multiplier when the card was revealed.
pub const REVEAL_PENALTY: Points = Points(20);

/// Only the numeric score gates complexity; the categorical rating is ignored.
pub fn complexity_applies(raw_score: f64) -> bool {
    raw_score >= GATING_THRESHOLD
}

/// Zeroes the complexity bonus when the score does not clear the gate.
pub fn gate(raw_score: f64, complexity_bonus: Points) -> Points {
    if complexity_applies(raw_score) {
        complexity_bonus
    } else {
        Points::ZERO
    }
}

/// A revealed card suppresses both bonuses regardless of the gating outcome.
pub fn effective_bonuses(
    card_revealed: bool,
    pronunciation_bonus: Points,
    complexity_bonus: Points,
) -> (Points, Points) {
    if card_revealed {
        (Points::ZERO, Points::ZERO)
    } else {
        (pronunciation_bonus, complexity_bonus)
    }
}

pub fn forces_full_damage(turn: TurnType, card_revealed: bool) -> bool {
    turn == TurnType::Defense && card_revealed
}

pub fn reveal_penalty(turn: TurnType, card_revealed: bool) -> Points {
    if turn == TurnType::Attack && card_revealed {
        REVEAL_PENALTY
    } else {
        Points::ZERO
    }
}
