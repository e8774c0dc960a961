//! Error types for catalog building and generation.
//!
//! Only configuration problems are errors. A set attempt that runs out of
//! candidates or fails the intermediate-severity check is an expected
//! outcome, reported through [`Attempt`](crate::Attempt).

use cvd_color::ColorError;
use thiserror::Error;

/// Generation error.
#[derive(Debug, Error)]
pub enum GenError {
    /// Configuration value out of range.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No color of the universe falls in the lightness window.
    #[error("no colors with J' in [{min_j}, {max_j}]")]
    EmptyCatalog {
        /// Lower lightness bound.
        min_j: f64,
        /// Upper lightness bound.
        max_j: f64,
    },

    /// Color model error.
    #[error(transparent)]
    Color(#[from] ColorError),
}

/// Result type for generation.
pub type GenResult<T> = Result<T, GenError>;
