//! Domain models and types for Veil.
//!
//! This module contains the data model every other layer works on.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Cell values** ([`Value`])
//! - **Tables** ([`Table`]), copy-on-write at row granularity
//! - **Context levels** ([`Granularity`], [`SensitivityLevel`], [`TrustLevel`])
//! - **Error types** ([`VeilError`], [`TechniqueError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations outside the technique library return
//! [`Result<T, VeilError>`]:
//!
//! ```rust
//! use veil::domain::{Granularity, Result};
//!
//! fn parse(tag: &str) -> Result<Granularity> {
//!     // Unknown tags surface as VeilError::InvalidInput
//!     tag.parse()
//! }
//!
//! assert!(parse("row").is_ok());
//! assert!(parse("dataset").is_err());
//! ```

pub mod errors;
pub mod levels;
pub mod result;
pub mod table;
pub mod value;

// Re-export commonly used types for convenience
pub use errors::{TechniqueError, VeilError};
pub use levels::{Granularity, SensitivityLevel, TrustLevel};
pub use result::Result;
pub use table::Table;
pub use value::Value;
