//! Audit logger for anonymization operations

use crate::anonymization::config::AuditConfig;
use crate::anonymization::report::RunReport;
use crate::domain::{Result, Table, VeilError};
use chrono::Utc;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Audit record of a table run
#[derive(Debug, Serialize)]
struct RunAuditEntry<'a> {
    kind: &'static str,
    timestamp: String,
    run_id: String,
    granularity: &'a str,
    sensitivity: &'a str,
    trust: &'a str,
    strategy: &'a str,
    rows: usize,
    columns: usize,
    score: f64,
    processing_time_ms: u64,
    /// SHA-256 of the serialized input table (never log plaintext data)
    input_hash: String,
}

/// Audit record of a single-value anonymization
#[derive(Debug, Serialize)]
struct ScalarAuditEntry<'a> {
    kind: &'static str,
    timestamp: String,
    attribute: &'a str,
    strategy: &'a str,
    /// SHA-256 of the original value
    value_hash: String,
}

/// Append-only audit log
pub struct AuditLogger {
    log_path: PathBuf,
    json_format: bool,
}

impl AuditLogger {
    /// Create a new audit logger, creating the log directory if needed
    pub fn new(config: &AuditConfig) -> Result<Self> {
        if let Some(parent) = config.log_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    VeilError::Audit(format!(
                        "Failed to create audit log directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        Ok(Self {
            log_path: config.log_path.clone(),
            json_format: config.json_format,
        })
    }

    /// Log a table run
    pub fn log_run(&self, report: &RunReport, original: &Table) -> Result<()> {
        let input = serde_json::to_string(original)?;
        let entry = RunAuditEntry {
            kind: "table",
            timestamp: report.timestamp.to_rfc3339(),
            run_id: report.run_id.to_string(),
            granularity: report.granularity.as_str(),
            sensitivity: report.sensitivity.as_str(),
            trust: report.trust.as_str(),
            strategy: report.applied_label(),
            rows: report.rows,
            columns: report.columns,
            score: report.score.score,
            processing_time_ms: report.processing_time_ms,
            input_hash: hash_value(&input),
        };

        let plain = format!(
            "[{}] Run: {} | Context: {}/{}/{} | Strategy: {} | Shape: {}x{} | Score: {:.4} | Time: {}ms",
            entry.timestamp,
            entry.run_id,
            entry.granularity,
            entry.sensitivity,
            entry.trust,
            entry.strategy,
            entry.rows,
            entry.columns,
            entry.score,
            entry.processing_time_ms
        );
        self.write_entry(&entry, &plain)
    }

    /// Log a single-value anonymization
    pub fn log_scalar(&self, attribute: &str, original: &str, strategy: &str) -> Result<()> {
        let entry = ScalarAuditEntry {
            kind: "value",
            timestamp: Utc::now().to_rfc3339(),
            attribute,
            strategy,
            value_hash: hash_value(original),
        };

        let plain = format!(
            "[{}] Attribute: {} | Strategy: {} | Value: {}",
            entry.timestamp, entry.attribute, entry.strategy, entry.value_hash
        );
        self.write_entry(&entry, &plain)
    }

    /// Write an audit entry to the log file
    fn write_entry<T: Serialize>(&self, entry: &T, plain: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| {
                VeilError::Audit(format!(
                    "Failed to open audit log {}: {e}",
                    self.log_path.display()
                ))
            })?;

        let line = if self.json_format {
            serde_json::to_string(entry)?
        } else {
            plain.to_string()
        };
        writeln!(file, "{line}")
            .map_err(|e| VeilError::Audit(format!("Failed to write audit entry: {e}")))?;

        Ok(())
    }
}

/// Hash a value using SHA-256
pub fn hash_value(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let result = hasher.finalize();
    format!("{result:x}")
}
