//! Anonymize-values command implementation
//!
//! Reads `attribute::value` lines, anonymizes every value on the
//! single-value path and writes one result per line.

use super::{load_settings, EXIT_CONFIG_ERROR, EXIT_INPUT_ERROR};
use crate::anonymization::AnonymizationEngine;
use crate::domain::{SensitivityLevel, TrustLevel};
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;

/// Separator between attribute and value
const FIELD_SEPARATOR: &str = "::";

/// Arguments for the anonymize-values command
#[derive(Args, Debug)]
pub struct AnonymizeValuesArgs {
    /// Input file of `attribute::value` lines
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output file, one anonymized value per line
    #[arg(short, long)]
    pub output: PathBuf,

    /// Sensitivity level of the values
    #[arg(short, long)]
    pub sensitivity: SensitivityLevel,

    /// Trust level of the consumer
    #[arg(short, long)]
    pub trust: TrustLevel,
}

impl AnonymizeValuesArgs {
    /// Execute the anonymize-values command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_settings(config_path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load configuration: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        let contents = match std::fs::read_to_string(&self.input) {
            Ok(contents) => contents,
            Err(e) => {
                eprintln!("❌ Failed to read {}: {e}", self.input.display());
                return Ok(EXIT_INPUT_ERROR);
            }
        };

        let mut engine = match AnonymizationEngine::new(config.anonymization) {
            Ok(engine) => engine,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        let mut lines = Vec::new();
        for (attribute, value) in parse_value_lines(&contents) {
            let result =
                engine.run_scalar(Some(value), attribute, self.sensitivity, self.trust)?;
            lines.push(result.value.unwrap_or_default());
        }

        let mut output = lines.join("\n");
        if !lines.is_empty() {
            output.push('\n');
        }
        std::fs::write(&self.output, output)
            .with_context(|| format!("Failed to write {}", self.output.display()))?;

        tracing::info!(values = lines.len(), output = %self.output.display(), "Values anonymized");
        println!("✅ Anonymized {} values into {}", lines.len(), self.output.display());
        Ok(0)
    }
}

/// Split `attribute::value` lines
///
/// Blank lines are ignored; lines without the separator or with an empty
/// attribute are skipped with a warning.
pub fn parse_value_lines(contents: &str) -> Vec<(&str, &str)> {
    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(number, line)| match line.split_once(FIELD_SEPARATOR) {
            Some((attribute, value)) if !attribute.trim().is_empty() => {
                Some((attribute.trim(), value.trim()))
            }
            _ => {
                tracing::warn!(line = number + 1, "Skipping malformed line");
                None
            }
        })
        .collect()
}
