//! Run reporting
//!
//! A [`RunReport`] summarizes one pipeline run: the context that selected the
//! candidates, which candidate was committed and how much the data changed.

use crate::anonymization::score::AnonymizationScore;
use crate::anonymization::technique::Technique;
use crate::domain::{Granularity, SensitivityLevel, TrustLevel};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Summary of one anonymization run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Unique run identifier
    pub run_id: Uuid,

    /// When the run finished
    pub timestamp: DateTime<Utc>,

    pub granularity: Granularity,
    pub sensitivity: SensitivityLevel,
    pub trust: TrustLevel,

    /// Candidates in the order they were tried
    pub candidates: Vec<Technique>,

    /// First candidate that succeeded, if any
    pub applied_strategy: Option<Technique>,

    /// Distance between input and output
    pub score: AnonymizationScore,

    pub rows: usize,
    pub columns: usize,

    /// Wall-clock time of the run
    pub processing_time_ms: u64,
}

impl RunReport {
    /// Label of the committed strategy, `none` when nothing was applied
    pub fn applied_label(&self) -> &'static str {
        self.applied_strategy.map_or("none", |t| t.as_str())
    }

    /// Format report for console output
    pub fn format_console(&self) -> String {
        let candidates: Vec<&str> = self.candidates.iter().map(Technique::as_str).collect();
        let mut output = String::new();

        output.push('\n');
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push_str("                    ANONYMIZATION RUN REPORT                   \n");
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push_str(&format!("  Run ID:            {}\n", self.run_id));
        output.push_str(&format!("  Timestamp:         {}\n", self.timestamp.to_rfc3339()));
        output.push_str(&format!(
            "  Context:           {} / {} sensitivity / {} trust\n",
            self.granularity, self.sensitivity, self.trust
        ));
        output.push_str(&format!("  Table:             {} x {}\n", self.rows, self.columns));
        output.push_str(&format!("  Candidates:        {}\n", candidates.join(", ")));
        output.push_str(&format!("  Applied Strategy:  {}\n", self.applied_label()));
        output.push_str(&format!(
            "  Score:             {:.4} (utility retained {:.4})\n",
            self.score.score, self.score.utility_retained
        ));
        output.push_str(&format!("  Processing Time:   {} ms\n", self.processing_time_ms));
        output.push_str("═══════════════════════════════════════════════════════════════\n");

        output
    }

    /// Format report as JSON
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
