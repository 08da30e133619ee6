use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::resolver::{self, TurnFacts};
use crate::{
    CombatActionInput, CombatActionResult, CombatError, ComplexityLevel, ItemClass,
    PronunciationAssessment, Rating, TurnType,
};

const MIN_SCORE: f64 = 0.0;
const MAX_SCORE: f64 = 100.0;

/// Resolve a turn of either kind.
pub fn resolve(input: CombatActionInput) -> Result<CombatActionResult, CombatError> {
    match input.turn_type {
        TurnType::Attack => resolve_attack(input),
        TurnType::Defense => resolve_defense(input),
    }
}

pub fn resolve_attack(input: CombatActionInput) -> Result<CombatActionResult, CombatError> {
    let facts = validate(&input, TurnType::Attack)?;
    let result = resolver::attack(&facts).into_result(input.base_value);
    log_resolved(&result);
    Ok(result)
}

pub fn resolve_defense(input: CombatActionInput) -> Result<CombatActionResult, CombatError> {
    let facts = validate(&input, TurnType::Defense)?;
    let result = resolver::defense(&facts).into_result(input.base_value);
    log_resolved(&result);
    Ok(result)
}

fn validate(input: &CombatActionInput, expected: TurnType) -> Result<TurnFacts, CombatError> {
    check_input(input, expected).inspect_err(|e| {
        warn!(error = %e, ?input, "rejected combat input");
    })
}

fn check_input(input: &CombatActionInput, expected: TurnType) -> Result<TurnFacts, CombatError> {
    if input.turn_type != expected {
        return Err(CombatError::TurnMismatch {
            expected,
            found: input.turn_type,
        });
    }
    let raw_score = input.assessment.raw_score;
    // NaN fails the range check too.
    if !(MIN_SCORE..=MAX_SCORE).contains(&raw_score) {
        return Err(CombatError::InvalidScore(raw_score));
    }
    let level = ComplexityLevel::try_from(input.complexity)?;
    if !input.base_value.is_finite() || input.base_value < 0.0 {
        return Err(CombatError::InvalidBaseValue(input.base_value));
    }
    Ok(TurnFacts {
        item_class: input.item_class,
        rating: input.assessment.rating,
        level,
        raw_score,
        card_revealed: input.card_revealed,
    })
}

fn log_resolved(result: &CombatActionResult) {
    debug!(
        turn = %result.turn_type,
        damage = result.final_damage,
        multiplier = result.multiplier,
        pronunciation = result.pronunciation_bonus,
        complexity = result.complexity_bonus,
        revealed = result.reveal_penalty_applied,
        clamped = result.clamp_applied,
        "resolved combat action"
    );
}

/* ---------------- wire request ---------------- */

/// Loosely typed request as it arrives over JSON; enum fields are strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CombatRequest {
    pub turn_type: String,
    #[serde(default = "default_item_class")]
    pub item_class: String,
    pub raw_score: f64,
    pub rating: String,
    pub complexity: i64,
    #[serde(default)]
    pub card_revealed: bool,
    pub base_value: f64,
}

fn default_item_class() -> String {
    ItemClass::Regular.as_str().to_string()
}

impl TryFrom<CombatRequest> for CombatActionInput {
    type Error = CombatError;

    fn try_from(req: CombatRequest) -> Result<Self, Self::Error> {
        let complexity = u8::try_from(req.complexity)
            .map_err(|_| CombatError::InvalidComplexity(req.complexity))?;
        Ok(CombatActionInput {
            turn_type: req.turn_type.parse()?,
            item_class: req.item_class.parse()?,
            assessment: PronunciationAssessment {
                raw_score: req.raw_score,
                rating: req.rating.parse()?,
            },
            complexity,
            card_revealed: req.card_revealed,
            base_value: req.base_value,
        })
    }
}

pub fn resolve_request(req: CombatRequest) -> Result<CombatActionResult, CombatError> {
    resolve(CombatActionInput::try_from(req)?)
}

/* ---------------- sweep & invariants ---------------- */

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SweepEntry {
    pub input: CombatActionInput,
    pub result: CombatActionResult,
}

/// Resolve every categorical combination for one score and base value, in a
/// fixed order: turn, item class, rating, level, revealed.
pub fn sweep(raw_score: f64, base_value: f64) -> Result<Vec<SweepEntry>, CombatError> {
    let mut entries = Vec::new();
    for turn_type in TurnType::ALL {
        for item_class in ItemClass::ALL {
            for rating in Rating::ALL {
                for level in ComplexityLevel::ALL {
                    for card_revealed in [false, true] {
                        let input = CombatActionInput {
                            turn_type,
                            item_class,
                            assessment: PronunciationAssessment { raw_score, rating },
                            complexity: level.get(),
                            card_revealed,
                            base_value,
                        };
                        let result = resolve(input)?;
                        entries.push(SweepEntry { input, result });
                    }
                }
            }
        }
    }
    Ok(entries)
}

/// Checks the guarantees every resolved turn must satisfy; returns one message
/// per violation.
pub fn check_invariants(input: &CombatActionInput, result: &CombatActionResult) -> Vec<String> {
    let mut violations = Vec::new();
    let mut fail = |msg: String| violations.push(msg);

    if input.assessment.rating == Rating::NeedsImprovement && result.pronunciation_bonus != 0.0 {
        fail(format!(
            "needs_improvement produced pronunciation bonus {}",
            result.pronunciation_bonus
        ));
    }
    if input.assessment.raw_score < crate::policy::GATING_THRESHOLD && result.complexity_bonus != 0.0
    {
        fail(format!(
            "score {} below gate produced complexity bonus {}",
            input.assessment.raw_score, result.complexity_bonus
        ));
    }
    if input.card_revealed && (result.pronunciation_bonus != 0.0 || result.complexity_bonus != 0.0)
    {
        fail(format!(
            "revealed card kept bonuses {} / {}",
            result.pronunciation_bonus, result.complexity_bonus
        ));
    }
    match input.turn_type {
        TurnType::Defense => {
            if input.card_revealed
                && (result.multiplier != 1.0 || result.final_damage != input.base_value)
            {
                fail(format!(
                    "revealed defense dealt {} (multiplier {}) instead of {}",
                    result.final_damage, result.multiplier, input.base_value
                ));
            }
            if !(0.1..=1.0).contains(&result.multiplier) {
                fail(format!(
                    "defense multiplier {} outside 0.1..=1.0",
                    result.multiplier
                ));
            }
            if result.final_damage > input.base_value {
                fail(format!(
                    "defense dealt {} above base {}",
                    result.final_damage, input.base_value
                ));
            }
        }
        TurnType::Attack => {
            if result.multiplier < 0.8 {
                fail(format!("attack multiplier {} below 0.8", result.multiplier));
            }
            if result.final_damage < input.base_value * 0.8 {
                fail(format!(
                    "attack dealt {} below {} × 0.8",
                    result.final_damage, input.base_value
                ));
            }
        }
    }
    violations
}
