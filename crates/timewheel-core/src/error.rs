//! Error types for the wheel core.

use thiserror::Error;

use crate::time::ParseError;

/// Errors raised while building or driving a wheel.
#[derive(Debug, Error)]
pub enum WheelError {
    #[error("Invalid time: {0}")]
    Parse(#[from] ParseError),
    #[error("Handle not found: {0}")]
    NotFound(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type for wheel operations.
pub type WheelResult<T> = Result<T, WheelError>;
