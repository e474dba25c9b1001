use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("calculate: operand must be a score or an integer literal, got {0}")]
    InvalidCalculateOperand(String),
    #[error("if: operand must be a score or an integer literal, got {0}")]
    InvalidConditionOperand(String),
    #[error("Unknown scoreboard operation: {0}")]
    UnknownOperation(String),
    #[error("Unknown condition: {0}")]
    UnknownComparison(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
