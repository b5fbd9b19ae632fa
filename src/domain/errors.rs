//! Domain error types
//!
//! This module defines the error hierarchy for Veil. Errors that callers can
//! observe are [`VeilError`] variants; failures of an individual anonymization
//! technique are [`TechniqueError`]s, which the engine recovers from locally.

use thiserror::Error;

/// Main Veil error type
///
/// This is the primary error type used throughout the library.
#[derive(Debug, Error)]
pub enum VeilError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Malformed input data (duplicate columns, oversized rows, bad level names)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Original and anonymized tables cannot be compared cell by cell
    #[error(
        "Shape mismatch: original is {original_rows}x{original_columns}, \
         anonymized is {anonymized_rows}x{anonymized_columns}"
    )]
    ShapeMismatch {
        original_rows: usize,
        original_columns: usize,
        anonymized_rows: usize,
        anonymized_columns: usize,
    },

    /// A technique failed outside of the engine's candidate loop
    #[error("Technique error: {0}")]
    Technique(#[from] TechniqueError),

    /// Audit logging errors
    #[error("Audit error: {0}")]
    Audit(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Technique-specific errors
///
/// Returned by every operation of the technique library. Inside the engine a
/// `TechniqueError` means "abandon this attempt and try the next candidate".
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TechniqueError {
    /// The strategy name has no implementation at this granularity
    #[error("Strategy '{strategy}' is not supported at {granularity} granularity")]
    Unsupported {
        strategy: String,
        granularity: String,
    },

    /// The granularity tag itself is unknown
    #[error("Unsupported granularity: {0}")]
    UnsupportedGranularity(String),

    /// A technique parameter is out of range
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// A value that had to be numeric was not
    #[error("Non-numeric value: {0}")]
    NonNumeric(String),

    /// Column index or name does not exist in the table
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// An aggregated table could not be merged back into the working table
    #[error("Aggregated table does not match the working table: {0}")]
    ShapeMismatch(String),
}

impl TechniqueError {
    /// Shorthand for [`TechniqueError::InvalidParameter`]
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for VeilError {
    fn from(err: std::io::Error) -> Self {
        VeilError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for VeilError {
    fn from(err: serde_json::Error) -> Self {
        VeilError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for VeilError {
    fn from(err: toml::de::Error) -> Self {
        VeilError::Configuration(format!("TOML parse error: {err}"))
    }
}
