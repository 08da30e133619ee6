use thiserror::Error;

use crate::TurnType;

/// Rejected combat input. The engine fails fast instead of coercing a bad
/// value into a table entry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CombatError {
    #[error("raw score {0} is outside 0..=100")]
    InvalidScore(f64),
    #[error("complexity level {0} is outside 1..=5")]
    InvalidComplexity(i64),
    #[error("unrecognized pronunciation rating '{0}'")]
    InvalidRating(String),
    #[error("unrecognized item class '{0}'")]
    InvalidItemClass(String),
    #[error("unrecognized turn type '{0}'")]
    InvalidTurnType(String),
    #[error("base value {0} must be finite and non-negative")]
    InvalidBaseValue(f64),
    #[error("expected a {expected} turn, got {found}")]
    TurnMismatch { expected: TurnType, found: TurnType },
}

/// Failure to load or validate a balance configuration.
#[derive(Error, Debug)]
pub enum BalanceError {
    #[error("failed to read balance file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse balance JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to parse balance YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unknown balance preset '{0}'")]
    UnknownPreset(String),
    #[error("invalid balance value: {0}")]
    Invalid(String),
}
