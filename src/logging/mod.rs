//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output with configurable log levels
//! - JSON-formatted local file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use veil::logging::init_logging;
//! use veil::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! // Use tracing macros for logging
//! tracing::info!("Application started");
//! tracing::error!(error = "Something went wrong", "Error occurred");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log a committed strategy
///
/// # Example
///
/// ```no_run
/// use veil::log_strategy_applied;
/// use veil::anonymization::Technique;
/// use veil::domain::{Granularity, TrustLevel};
///
/// log_strategy_applied!(Technique::Binning, Granularity::Column, TrustLevel::Low);
/// ```
#[macro_export]
macro_rules! log_strategy_applied {
    ($strategy:expr, $granularity:expr, $trust:expr) => {
        tracing::info!(
            strategy = %$strategy,
            granularity = %$granularity,
            trust = %$trust,
            "Strategy applied"
        )
    };
}

/// Log a candidate strategy that failed and was skipped
///
/// # Example
///
/// ```no_run
/// use veil::log_strategy_skipped;
/// use veil::domain::TechniqueError;
///
/// let error = TechniqueError::invalid("k", "must be at least 1");
/// log_strategy_skipped!("microaggregation", error);
/// ```
#[macro_export]
macro_rules! log_strategy_skipped {
    ($strategy:expr, $reason:expr) => {
        tracing::warn!(
            strategy = %$strategy,
            reason = %$reason,
            "Strategy skipped"
        )
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use veil::log_error_with_context;
/// use veil::domain::VeilError;
///
/// let error = VeilError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        )
    };
}
