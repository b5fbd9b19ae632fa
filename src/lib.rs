// Veil - Context-aware data anonymization
// Copyright (c) 2025 Veil Contributors
// Licensed under the MIT License

//! # Veil - Context-aware data anonymization
//!
//! Veil anonymizes tabular and single-value personal data. The technique is
//! chosen from the granularity of the data, its sensitivity and the trust
//! placed in whoever receives it.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Selecting** an ordered list of candidate techniques for a context
//! - **Applying** the first candidate that succeeds, without partial writes
//! - **Scoring** how far the anonymized table moved from the original
//! - **Auditing** every run with hashed inputs
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`anonymization`] - Matrix, engine, techniques, scoring and audit
//! - [`domain`] - Tables, values, context levels and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust
//! use veil::anonymization::{strategies, AnonymizationConfig, AnonymizationEngine};
//! use veil::domain::{Granularity, SensitivityLevel, Table, TrustLevel, Value};
//!
//! # fn example() -> veil::domain::Result<()> {
//! let table = Table::with_rows(
//!     ["name", "city"],
//!     vec![
//!         vec![Value::from("Ada"), Value::from("London")],
//!         vec![Value::from("Alan"), Value::from("Wilmslow")],
//!     ],
//! )?;
//!
//! let candidates = strategies(Granularity::Table, SensitivityLevel::High, TrustLevel::Low);
//! let mut engine = AnonymizationEngine::new(AnonymizationConfig::default())?;
//! let result = engine.anonymize(&table, candidates, Granularity::Table, TrustLevel::Low);
//!
//! assert!(result.applied_strategy.is_some());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Single values
//!
//! Values without a surrounding table go through the scalar path, which
//! never fails:
//!
//! ```rust
//! use veil::anonymization::{AnonymizationConfig, AnonymizationEngine};
//! use veil::domain::{SensitivityLevel, TrustLevel};
//!
//! # fn example() -> veil::domain::Result<()> {
//! let mut engine = AnonymizationEngine::new(AnonymizationConfig::default())?;
//! let result = engine.run_scalar(
//!     Some("Mysuru"),
//!     "city",
//!     SensitivityLevel::Moderate,
//!     TrustLevel::Moderate,
//! )?;
//! assert_eq!(result.value.as_deref(), Some("CAT_M"));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Error Handling
//!
//! Veil uses [`domain::VeilError`] for all errors. Technique failures are
//! reported as [`domain::TechniqueError`] and consumed by the engine, which
//! moves on to the next candidate.
//!
//! ## Logging
//!
//! Veil uses structured logging with the `tracing` crate. See
//! [`logging::init_logging`].

pub mod anonymization;
pub mod cli;
pub mod config;
pub mod domain;
pub mod logging;
