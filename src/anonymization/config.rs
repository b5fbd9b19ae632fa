//! Anonymization configuration

use crate::domain::errors::VeilError;
use crate::domain::result::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Tunable parameters of the technique library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechniqueParams {
    /// Privacy parameter of the Laplace techniques
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,

    /// Width of a bin for `binning`
    #[serde(default = "default_bin_size")]
    pub bin_size: f64,

    /// Group size for `microaggregation`
    #[serde(default = "default_k")]
    pub k: usize,

    /// Minimum frequency a value needs to survive `cell_suppression`
    #[serde(default = "default_suppression_threshold")]
    pub suppression_threshold: usize,

    /// Number of buckets for `generalization`
    #[serde(default = "default_generalization_bins")]
    pub generalization_bins: usize,

    /// Lower percentile for `top_bottom_coding`
    #[serde(default = "default_bottom_percentile")]
    pub bottom_percentile: f64,

    /// Upper percentile for `top_bottom_coding`
    #[serde(default = "default_top_percentile")]
    pub top_percentile: f64,

    /// Relative noise bound for single-value noise injection
    #[serde(default = "default_cell_noise_ratio")]
    pub cell_noise_ratio: f64,
}

impl Default for TechniqueParams {
    fn default() -> Self {
        Self {
            epsilon: default_epsilon(),
            bin_size: default_bin_size(),
            k: default_k(),
            suppression_threshold: default_suppression_threshold(),
            generalization_bins: default_generalization_bins(),
            bottom_percentile: default_bottom_percentile(),
            top_percentile: default_top_percentile(),
            cell_noise_ratio: default_cell_noise_ratio(),
        }
    }
}

impl TechniqueParams {
    /// Validates the parameters
    ///
    /// # Errors
    ///
    /// Returns a description of the first out-of-range parameter
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(format!(
                "anonymization.techniques.epsilon must be a positive number, got {}",
                self.epsilon
            ));
        }
        if !(self.bin_size.is_finite() && self.bin_size > 0.0) {
            return Err(format!(
                "anonymization.techniques.bin_size must be > 0, got {}",
                self.bin_size
            ));
        }
        if self.k == 0 {
            return Err("anonymization.techniques.k must be >= 1".to_string());
        }
        if self.suppression_threshold == 0 {
            return Err("anonymization.techniques.suppression_threshold must be >= 1".to_string());
        }
        if self.generalization_bins == 0 {
            return Err("anonymization.techniques.generalization_bins must be >= 1".to_string());
        }
        for (name, value) in [
            ("bottom_percentile", self.bottom_percentile),
            ("top_percentile", self.top_percentile),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(format!(
                    "anonymization.techniques.{name} must be within [0, 100], got {value}"
                ));
            }
        }
        if self.bottom_percentile >= self.top_percentile {
            return Err(format!(
                "anonymization.techniques.bottom_percentile ({}) must be below top_percentile ({})",
                self.bottom_percentile, self.top_percentile
            ));
        }
        if !(0.0..=1.0).contains(&self.cell_noise_ratio) {
            return Err(format!(
                "anonymization.techniques.cell_noise_ratio must be within [0, 1], got {}",
                self.cell_noise_ratio
            ));
        }
        Ok(())
    }

    /// Apply `VEIL_ANONYMIZATION_TECHNIQUES_*` environment overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        override_from_env("VEIL_ANONYMIZATION_TECHNIQUES_EPSILON", &mut self.epsilon)?;
        override_from_env("VEIL_ANONYMIZATION_TECHNIQUES_BIN_SIZE", &mut self.bin_size)?;
        override_from_env("VEIL_ANONYMIZATION_TECHNIQUES_K", &mut self.k)?;
        override_from_env(
            "VEIL_ANONYMIZATION_TECHNIQUES_SUPPRESSION_THRESHOLD",
            &mut self.suppression_threshold,
        )?;
        override_from_env(
            "VEIL_ANONYMIZATION_TECHNIQUES_GENERALIZATION_BINS",
            &mut self.generalization_bins,
        )?;
        override_from_env(
            "VEIL_ANONYMIZATION_TECHNIQUES_BOTTOM_PERCENTILE",
            &mut self.bottom_percentile,
        )?;
        override_from_env(
            "VEIL_ANONYMIZATION_TECHNIQUES_TOP_PERCENTILE",
            &mut self.top_percentile,
        )?;
        override_from_env(
            "VEIL_ANONYMIZATION_TECHNIQUES_CELL_NOISE_RATIO",
            &mut self.cell_noise_ratio,
        )?;
        Ok(())
    }
}

/// Anonymization configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnonymizationConfig {
    /// Technique parameters
    #[serde(default)]
    pub techniques: TechniqueParams,

    /// Audit logging configuration
    #[serde(default)]
    pub audit: AuditConfig,
}

impl AnonymizationConfig {
    /// Validate the configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        self.techniques.validate()?;
        self.audit.validate()?;
        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.techniques.apply_env_overrides()?;
        self.audit.apply_env_overrides()?;
        Ok(())
    }
}

/// Audit logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Enable audit logging
    #[serde(default)]
    pub enabled: bool,

    /// Audit log file path
    #[serde(default = "default_audit_log_path")]
    pub log_path: PathBuf,

    /// Use JSON format for audit logs
    #[serde(default = "default_audit_json_format")]
    pub json_format: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_path: default_audit_log_path(),
            json_format: default_audit_json_format(),
        }
    }
}

impl AuditConfig {
    /// Validate audit configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.enabled && self.log_path.as_os_str().is_empty() {
            return Err("anonymization.audit.log_path must not be empty when auditing is enabled"
                .to_string());
        }
        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        override_from_env("VEIL_ANONYMIZATION_AUDIT_ENABLED", &mut self.enabled)?;
        if let Ok(val) = std::env::var("VEIL_ANONYMIZATION_AUDIT_LOG_PATH") {
            self.log_path = PathBuf::from(val);
        }
        override_from_env("VEIL_ANONYMIZATION_AUDIT_JSON_FORMAT", &mut self.json_format)?;
        Ok(())
    }
}

/// Parse an environment variable into `target` when it is set
fn override_from_env<T: std::str::FromStr>(name: &str, target: &mut T) -> Result<()> {
    if let Ok(val) = std::env::var(name) {
        *target = val
            .trim()
            .parse()
            .map_err(|_| VeilError::Configuration(format!("Invalid {name} value: '{val}'")))?;
    }
    Ok(())
}

fn default_epsilon() -> f64 {
    0.1
}

fn default_bin_size() -> f64 {
    10.0
}

fn default_k() -> usize {
    2
}

fn default_suppression_threshold() -> usize {
    2
}

fn default_generalization_bins() -> usize {
    3
}

fn default_bottom_percentile() -> f64 {
    10.0
}

fn default_top_percentile() -> f64 {
    90.0
}

fn default_cell_noise_ratio() -> f64 {
    0.05
}

fn default_audit_log_path() -> PathBuf {
    PathBuf::from("./audit/veil.log")
}

fn default_audit_json_format() -> bool {
    true
}
