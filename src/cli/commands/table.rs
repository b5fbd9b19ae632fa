//! Anonymize-table command implementation

use super::{load_settings, read_table, write_table, EXIT_CONFIG_ERROR, EXIT_INPUT_ERROR};
use crate::anonymization::profile::{
    identify_quasi_identifiers, overall_sensitivity, sensitive_attribute_ids,
};
use crate::anonymization::{AnonymizationEngine, SensitivityAssessment};
use crate::domain::{Granularity, SensitivityLevel, Table, TrustLevel};
use anyhow::Context;
use clap::Args;
use std::path::{Path, PathBuf};

/// Arguments for the anonymize-table command
#[derive(Args, Debug)]
pub struct AnonymizeTableArgs {
    /// Input JSON table (`{"columns": [...], "rows": [[...]]}`)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output JSON table
    #[arg(short, long)]
    pub output: PathBuf,

    /// Granularity; detected from the table shape when omitted
    #[arg(short, long)]
    pub granularity: Option<Granularity>,

    /// Sensitivity level of the table
    #[arg(short, long, required_unless_present = "assessments")]
    pub sensitivity: Option<SensitivityLevel>,

    /// JSON list of `{"attribute_id", "level"}` assessments; the highest
    /// level among the table's columns is used when `--sensitivity` is omitted
    #[arg(short, long)]
    pub assessments: Option<PathBuf>,

    /// Trust level of the consumer
    #[arg(short, long)]
    pub trust: TrustLevel,

    /// Print the run report as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl AnonymizeTableArgs {
    /// Execute the anonymize-table command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(input = %self.input.display(), "Starting anonymize-table command");

        let config = match load_settings(config_path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load configuration: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        let table = match read_table(&self.input) {
            Ok(table) => table,
            Err(e) => {
                eprintln!("❌ {e:#}");
                return Ok(EXIT_INPUT_ERROR);
            }
        };

        let sensitivity = match self.resolve_sensitivity(&table) {
            Ok(level) => level,
            Err(e) => {
                eprintln!("❌ {e:#}");
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

        let output = engine.run(&table, sensitivity, self.trust, self.granularity)?;
        write_table(&self.output, &output.anonymized)?;

        if self.json {
            println!("{}", output.report.format_json()?);
        } else {
            println!("{}", output.report.format_console());
        }
        Ok(0)
    }

    /// Explicit `--sensitivity`, else the highest assessed column level
    fn resolve_sensitivity(&self, table: &Table) -> anyhow::Result<SensitivityLevel> {
        let assessments = match &self.assessments {
            Some(path) => read_assessments(path)?,
            None => Vec::new(),
        };

        if !assessments.is_empty() {
            tracing::info!(
                sensitive = ?sensitive_attribute_ids(&assessments),
                quasi_identifiers = ?identify_quasi_identifiers(table, 0.0, 1.0),
                "Profiled table attributes"
            );
        }

        Ok(self
            .sensitivity
            .unwrap_or_else(|| overall_sensitivity(table, &assessments)))
    }
}

fn read_assessments(path: &Path) -> anyhow::Result<Vec<SensitivityAssessment>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse assessments in {}", path.display()))
}
