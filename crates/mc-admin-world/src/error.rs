//! Errors raised by collaborator state.

use thiserror::Error;

use crate::gamerules::{GameRule, RuleType};

#[derive(Debug, Error)]
pub enum WorldError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),

    #[error("unknown game rule: {0}")]
    UnknownGameRule(String),

    #[error("game rule {rule} expects a {expected} value")]
    RuleTypeMismatch { rule: GameRule, expected: RuleType },

    #[error("game rule {rule} value {value} is outside {min}..={max}")]
    RuleOutOfRange {
        rule: GameRule,
        value: i32,
        min: i32,
        max: i32,
    },
}
