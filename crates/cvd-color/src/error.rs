//! Error types for color operations.
//!
//! The conversion functions themselves are infallible; errors arise only
//! from contract violations at the API boundary (an out-of-range CVD
//! severity, a malformed hex string) and from building the model context.

use thiserror::Error;

/// Color operation error.
#[derive(Debug, Error, PartialEq)]
pub enum ColorError {
    /// Input value is outside the accepted domain.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A fixed transform matrix could not be inverted.
    #[error("matrix error: {0}")]
    MatrixError(String),

    /// Hex color string could not be parsed.
    #[error("parse error: {0}")]
    ParseError(String),
}

/// Result type for color operations.
pub type ColorResult<T> = Result<T, ColorError>;
