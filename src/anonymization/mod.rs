//! Anonymization module for Veil
//!
//! This module selects, applies and evaluates anonymization techniques for
//! tables and single values.
//!
//! # Architecture
//!
//! The anonymization pipeline consists of:
//! - **Matrix**: context → ordered candidate techniques ([`matrix::strategies`])
//! - **Engine**: first-success application with copy-on-attempt ([`AnonymizationEngine`])
//! - **Techniques**: masking, noise, suppression, coding, aggregation, generalization
//! - **Score**: distance and retained utility ([`score::calculate_score`])
//! - **Profile**: granularity detection and sensitivity aggregation
//! - **Audit**: append-only records with hashed original data
//!
//! # Usage
//!
//! ```rust
//! use veil::anonymization::{AnonymizationConfig, AnonymizationEngine};
//! use veil::domain::{SensitivityLevel, Table, TrustLevel, Value};
//!
//! # fn example() -> veil::domain::Result<()> {
//! let table = Table::with_rows(
//!     ["age", "income"],
//!     vec![
//!         vec![Value::from(31), Value::from(42_000)],
//!         vec![Value::from(45), Value::from(51_000)],
//!     ],
//! )?;
//!
//! let mut engine = AnonymizationEngine::new(AnonymizationConfig::default())?;
//! let output = engine.run(&table, SensitivityLevel::High, TrustLevel::Moderate, None)?;
//! println!("{}", output.report.format_console());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod audit;
pub mod config;
pub mod engine;
pub mod matrix;
pub mod profile;
pub mod report;
pub mod score;
pub mod technique;
pub mod techniques;

// Re-export main types
pub use config::{AnonymizationConfig, AuditConfig, TechniqueParams};
pub use engine::{
    AnonymizationEngine, AnonymizationResult, PipelineOutput, ScalarStrategy,
    SingleAnonymizationResult,
};
pub use matrix::{strategies, strategies_for};
pub use profile::SensitivityAssessment;
pub use report::RunReport;
pub use score::{calculate_score, AnonymizationScore};
pub use technique::Technique;
