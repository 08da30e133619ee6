use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize};

pub mod api;
pub mod balance;
pub mod content;
pub mod error;
pub mod policy;
pub mod resolver;
pub mod tables;

pub use api::{CombatRequest, resolve, resolve_attack, resolve_defense, resolve_request};
pub use balance::BalanceConfig;
pub use error::{BalanceError, CombatError};
pub use tables::Points;

/// Qualitative rating returned by the pronunciation assessment service.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Excellent,
    Good,
    Okay,
    NeedsImprovement,
}

impl Rating {
    pub const ALL: [Rating; 4] = [
        Rating::Excellent,
        Rating::Good,
        Rating::Okay,
        Rating::NeedsImprovement,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Rating::Excellent => "excellent",
            Rating::Good => "good",
            Rating::Okay => "okay",
            Rating::NeedsImprovement => "needs_improvement",
        }
    }
}

/// Lowercases and drops separators so `NeedsImprovement`, `needs_improvement`
/// and `needs improvement` all compare equal.
fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl FromStr for Rating {
    type Err = CombatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "excellent" => Ok(Rating::Excellent),
            "good" => Ok(Rating::Good),
            "okay" => Ok(Rating::Okay),
            "needsimprovement" => Ok(Rating::NeedsImprovement),
            _ => Err(CombatError::InvalidRating(s.to_string())),
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Class of the equipped battle item.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemClass {
    #[default]
    Regular,
    Special,
}

impl ItemClass {
    pub const ALL: [ItemClass; 2] = [ItemClass::Regular, ItemClass::Special];

    pub fn as_str(self) -> &'static str {
        match self {
            ItemClass::Regular => "regular",
            ItemClass::Special => "special",
        }
    }
}

impl FromStr for ItemClass {
    type Err = CombatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "regular" => Ok(ItemClass::Regular),
            "special" => Ok(ItemClass::Special),
            _ => Err(CombatError::InvalidItemClass(s.to_string())),
        }
    }
}

impl fmt::Display for ItemClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnType {
    Attack,
    Defense,
}

impl TurnType {
    pub const ALL: [TurnType; 2] = [TurnType::Attack, TurnType::Defense];

    pub fn as_str(self) -> &'static str {
        match self {
            TurnType::Attack => "attack",
            TurnType::Defense => "defense",
        }
    }
}

impl FromStr for TurnType {
    type Err = CombatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "attack" => Ok(TurnType::Attack),
            "defense" | "defence" => Ok(TurnType::Defense),
            _ => Err(CombatError::InvalidTurnType(s.to_string())),
        }
    }
}

impl fmt::Display for TurnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Difficulty tier of a vocabulary item, 1 (simplest) through 5 (hardest).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ComplexityLevel {
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
}

impl ComplexityLevel {
    pub const ALL: [ComplexityLevel; 5] = [
        ComplexityLevel::One,
        ComplexityLevel::Two,
        ComplexityLevel::Three,
        ComplexityLevel::Four,
        ComplexityLevel::Five,
    ];

    pub fn get(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for ComplexityLevel {
    type Error = CombatError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(ComplexityLevel::One),
            2 => Ok(ComplexityLevel::Two),
            3 => Ok(ComplexityLevel::Three),
            4 => Ok(ComplexityLevel::Four),
            5 => Ok(ComplexityLevel::Five),
            other => Err(CombatError::InvalidComplexity(i64::from(other))),
        }
    }
}

/// Reads the tier as a plain integer so values outside `u8` report
/// `InvalidComplexity` rather than a generic overflow.
fn complexity_from_wire<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let level = i64::deserialize(deserializer)?;
    u8::try_from(level).map_err(|_| de::Error::custom(CombatError::InvalidComplexity(level)))
}

/// Output of the external assessment service. `rating` is never derived from
/// `raw_score`; both arrive from the same upstream call.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PronunciationAssessment {
    pub raw_score: f64,
    pub rating: Rating,
}

/// Everything needed to resolve one turn, assembled by the caller.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CombatActionInput {
    pub turn_type: TurnType,
    #[serde(default)]
    pub item_class: ItemClass,
    pub assessment: PronunciationAssessment,
    /// Unchecked tier; validated to 1..=5 on resolution.
    #[serde(deserialize_with = "complexity_from_wire")]
    pub complexity: u8,
    #[serde(default)]
    pub card_revealed: bool,
    /// Attack item base damage, or the boss's base attack on defense turns.
    pub base_value: f64,
}

/// Resolved damage plus the individual contributions shown to the player.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CombatActionResult {
    pub turn_type: TurnType,
    pub base_value: f64,
    pub final_damage: f64,
    pub multiplier: f64,
    /// `multiplier` in hundredths, exact.
    pub multiplier_points: i32,
    /// Multiplier before the defense clamp; equal to `multiplier` on attack.
    pub raw_multiplier: f64,
    pub pronunciation_bonus: f64,
    pub complexity_bonus: f64,
    pub reveal_penalty: f64,
    pub reveal_penalty_applied: bool,
    pub clamp_applied: bool,
}
