//! Configuration management for Veil.
//!
//! This module provides TOML-based configuration loading, parsing, and
//! validation.
//!
//! # Overview
//!
//! Veil uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `VEIL_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use veil::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("veil.toml")?;
//! println!("epsilon: {}", config.anonymization.techniques.epsilon);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`AnonymizationConfig`](crate::anonymization::AnonymizationConfig) - Technique
//!   parameters and audit logging
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [anonymization.techniques]
//! epsilon = 0.1
//! k = 2
//!
//! [anonymization.audit]
//! enabled = true
//! log_path = "${VEIL_AUDIT_DIR}/veil.log"
//!
//! [logging]
//! local_enabled = true
//! local_path = "./logs"
//! local_rotation = "daily"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_or_default, parse_config};
pub use schema::{ApplicationConfig, LoggingConfig, VeilConfig};
