//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Veil configuration file.

use super::EXIT_CONFIG_ERROR;
use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // Loading also validates
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        let techniques = &config.anonymization.techniques;
        let audit = &config.anonymization.audit;

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Epsilon: {}", techniques.epsilon);
        println!("  Bin Size: {}", techniques.bin_size);
        println!("  Microaggregation k: {}", techniques.k);
        println!("  Suppression Threshold: {}", techniques.suppression_threshold);
        println!("  Generalization Bins: {}", techniques.generalization_bins);
        println!(
            "  Top/Bottom Coding: {} / {}",
            techniques.bottom_percentile, techniques.top_percentile
        );
        println!("  Cell Noise Ratio: {}", techniques.cell_noise_ratio);
        if audit.enabled {
            println!("  Audit Log: {}", audit.log_path.display());
        } else {
            println!("  Audit Log: disabled");
        }
        if config.logging.local_enabled {
            println!(
                "  File Logging: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        }
        println!();
        Ok(0)
    }
}
