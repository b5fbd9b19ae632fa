//! Main anonymization engine
//!
//! This module provides the [`AnonymizationEngine`] that turns a list of
//! candidate techniques into one committed transformation.
//!
//! # Table path
//!
//! Candidates are tried in order. Every attempt runs on its own copy of the
//! committed table; the copy replaces the committed table only when the
//! technique succeeds, and the first success ends the loop. A failing
//! technique never leaves partial writes behind.
//!
//! # Scalar path
//!
//! A single value has no neighbours, so techniques that need other rows are
//! replaced by partial masking and table-only techniques are skipped. The
//! scalar path never fails.
//!
//! # Examples
//!
//! ```
//! use veil::anonymization::{AnonymizationEngine, AnonymizationConfig, Technique};
//! use veil::domain::{Granularity, Table, TrustLevel, Value};
//!
//! # fn example() -> veil::domain::Result<()> {
//! let mut engine = AnonymizationEngine::with_seed(AnonymizationConfig::default(), 7)?;
//!
//! let table = Table::with_rows(
//!     ["zip"],
//!     vec![vec![Value::from("12345")], vec![Value::from("67890")]],
//! )?;
//! let result = engine.anonymize(
//!     &table,
//!     &[Technique::PartialMasking],
//!     Granularity::Column,
//!     TrustLevel::Moderate,
//! );
//!
//! assert_eq!(result.applied_strategy, Some(Technique::PartialMasking));
//! assert_eq!(result.table.get(0, 0), Some(&Value::from("**345")));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

use crate::anonymization::{
    audit::AuditLogger,
    config::{AnonymizationConfig, TechniqueParams},
    matrix::strategies,
    profile::detect_granularity,
    report::RunReport,
    score::calculate_score,
    technique::Technique,
    techniques::{
        aggregation, coding, generalization, masking, noise, scalar, suppression, TechniqueResult,
    },
};
use crate::domain::{
    Granularity, Result, SensitivityLevel, Table, TechniqueError, TrustLevel, VeilError,
};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;
use std::time::Instant;
use uuid::Uuid;

/// Outcome of the table path
#[derive(Debug, Clone, PartialEq)]
pub struct AnonymizationResult {
    /// Anonymized copy of the input
    pub table: Table,
    /// Committed candidate, `None` when nothing succeeded
    pub applied_strategy: Option<Technique>,
}

/// How a single value was treated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScalarStrategy {
    /// The technique itself was applied
    Applied(Technique),
    /// A technique needing other rows was replaced by partial masking
    Defaulted { requested: Technique },
    /// Null or blank input, left unchanged
    EmptyInput,
    /// The only candidate has no single-value form
    UnknownNoOp { name: String },
    /// No candidate could transform the value
    NoApplicableStrategy,
}

impl ScalarStrategy {
    /// Label reported for the value
    pub fn label(&self) -> String {
        match self {
            Self::Applied(technique) => technique.as_str().to_string(),
            Self::Defaulted { requested } => {
                format!("{}_defaulted_to_partial_masking", requested.as_str())
            }
            Self::EmptyInput => "no_transformation_empty_input".to_string(),
            Self::UnknownNoOp { name } => format!("{name}_unknown_no_op"),
            Self::NoApplicableStrategy => "no_applicable_strategy_found".to_string(),
        }
    }
}

impl fmt::Display for ScalarStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Outcome of the scalar path
#[derive(Debug, Clone, PartialEq)]
pub struct SingleAnonymizationResult {
    /// Resulting value, `None` for null input
    pub value: Option<String>,
    pub strategy: ScalarStrategy,
}

impl SingleAnonymizationResult {
    fn new(value: Option<&str>, strategy: ScalarStrategy) -> Self {
        Self {
            value: value.map(str::to_string),
            strategy,
        }
    }

    /// Applied-strategy label
    pub fn applied_strategy(&self) -> String {
        self.strategy.label()
    }
}

/// Output of a pipeline run
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub anonymized: Table,
    pub report: RunReport,
}

/// Main anonymization engine
///
/// Owns the technique parameters, the random number generator used by the
/// noise techniques and the optional audit logger. Anonymization takes
/// `&mut self`; concurrent callers each need their own engine.
pub struct AnonymizationEngine {
    params: TechniqueParams,
    rng: StdRng,
    audit_logger: Option<AuditLogger>,
}

impl AnonymizationEngine {
    /// Create a new anonymization engine seeded from the OS
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration validation fails
    /// - Audit logger initialization fails
    pub fn new(config: AnonymizationConfig) -> Result<Self> {
        Self::build(config, StdRng::from_entropy())
    }

    /// Create an engine with a deterministic random number generator
    pub fn with_seed(config: AnonymizationConfig, seed: u64) -> Result<Self> {
        Self::build(config, StdRng::seed_from_u64(seed))
    }

    fn build(config: AnonymizationConfig, rng: StdRng) -> Result<Self> {
        config.validate().map_err(|e| {
            VeilError::Configuration(format!("Invalid anonymization configuration: {e}"))
        })?;

        let audit_logger = if config.audit.enabled {
            Some(AuditLogger::new(&config.audit)?)
        } else {
            None
        };

        Ok(Self {
            params: config.techniques,
            rng,
            audit_logger,
        })
    }

    /// Technique parameters in use
    pub fn params(&self) -> &TechniqueParams {
        &self.params
    }

    /// Apply the first candidate that succeeds
    ///
    /// An empty candidate list returns the table unchanged with no strategy.
    /// Unknown names and techniques without a form at `granularity` count as
    /// failures and fall through to the next candidate.
    pub fn anonymize<S: AsRef<str>>(
        &mut self,
        table: &Table,
        candidates: &[S],
        granularity: Granularity,
        trust: TrustLevel,
    ) -> AnonymizationResult {
        let mut committed = table.clone();

        for candidate in candidates {
            let name = candidate.as_ref();
            let mut attempt = committed.clone();
            match self.attempt(&mut attempt, name, granularity) {
                Ok(technique) => {
                    committed = attempt;
                    crate::log_strategy_applied!(technique, granularity, trust);
                    return AnonymizationResult {
                        table: committed,
                        applied_strategy: Some(technique),
                    };
                }
                Err(e) => crate::log_strategy_skipped!(name, e),
            }
        }

        if !candidates.is_empty() {
            tracing::warn!(
                granularity = %granularity,
                candidates = candidates.len(),
                "No candidate strategy could be applied"
            );
        }
        AnonymizationResult {
            table: committed,
            applied_strategy: None,
        }
    }

    /// [`anonymize`](Self::anonymize) with a granularity given by name
    ///
    /// An unknown granularity makes every candidate fail.
    pub fn anonymize_by_name<S: AsRef<str>>(
        &mut self,
        table: &Table,
        candidates: &[S],
        granularity: &str,
        trust: TrustLevel,
    ) -> AnonymizationResult {
        match granularity.parse::<Granularity>() {
            Ok(granularity) => self.anonymize(table, candidates, granularity, trust),
            Err(_) => {
                let error = TechniqueError::UnsupportedGranularity(granularity.to_string());
                for candidate in candidates {
                    crate::log_strategy_skipped!(candidate.as_ref(), error);
                }
                AnonymizationResult {
                    table: table.clone(),
                    applied_strategy: None,
                }
            }
        }
    }

    /// Anonymize a single value
    ///
    /// Always returns a result; see the module documentation for the rules.
    pub fn anonymize_scalar<S: AsRef<str>>(
        &mut self,
        value: Option<&str>,
        attribute: &str,
        candidates: &[S],
    ) -> SingleAnonymizationResult {
        let text = match value {
            Some(text) if !text.trim().is_empty() => text,
            _ => return SingleAnonymizationResult::new(value, ScalarStrategy::EmptyInput),
        };

        let mut provisional: Option<SingleAnonymizationResult> = None;
        for candidate in candidates {
            let name = candidate.as_ref();
            let Some(technique) = Technique::from_name(name) else {
                tracing::warn!(attribute, strategy = name, "Unknown strategy skipped");
                continue;
            };

            if technique == Technique::NoTransformation {
                return provisional.unwrap_or_else(|| {
                    SingleAnonymizationResult::new(Some(text), ScalarStrategy::Applied(technique))
                });
            }

            if technique.is_scalar_direct() {
                match self.apply_scalar(technique, text) {
                    Ok(output) if output != text => {
                        tracing::debug!(attribute, strategy = %technique, "Value anonymized");
                        return SingleAnonymizationResult {
                            value: Some(output),
                            strategy: ScalarStrategy::Applied(technique),
                        };
                    }
                    Ok(_) => {
                        tracing::debug!(attribute, strategy = %technique, "Value unchanged");
                    }
                    Err(e) => {
                        tracing::warn!(attribute, strategy = %technique, reason = %e, "Strategy failed");
                    }
                }
            } else if technique.requires_cross_row_context() {
                if provisional.is_none() {
                    tracing::debug!(
                        attribute,
                        strategy = %technique,
                        "Strategy needs other rows, defaulting to partial masking"
                    );
                    provisional = Some(SingleAnonymizationResult {
                        value: Some(scalar::partial_mask_value(text)),
                        strategy: ScalarStrategy::Defaulted {
                            requested: technique,
                        },
                    });
                }
            } else {
                tracing::warn!(
                    attribute,
                    strategy = %technique,
                    "Strategy has no single-value form, skipped"
                );
            }
        }

        if let Some(result) = provisional {
            return result;
        }
        let strategy = match candidates {
            [only] => {
                let name: &str = only.as_ref();
                if is_scalar_candidate(name) {
                    ScalarStrategy::NoApplicableStrategy
                } else {
                    ScalarStrategy::UnknownNoOp {
                        name: name.trim().to_string(),
                    }
                }
            }
            _ => ScalarStrategy::NoApplicableStrategy,
        };
        SingleAnonymizationResult::new(Some(text), strategy)
    }

    /// Profile, anonymize, score and audit a table
    ///
    /// Uses `granularity` when given, otherwise the one implied by the shape
    /// of the table.
    ///
    /// # Errors
    ///
    /// Returns an error if scoring detects a shape mismatch or the audit
    /// record cannot be written.
    pub fn run(
        &mut self,
        table: &Table,
        sensitivity: SensitivityLevel,
        trust: TrustLevel,
        granularity: Option<Granularity>,
    ) -> Result<PipelineOutput> {
        let start = Instant::now();
        let granularity = granularity.unwrap_or_else(|| detect_granularity(table));
        let candidates = strategies(granularity, sensitivity, trust);

        tracing::info!(
            granularity = %granularity,
            sensitivity = %sensitivity,
            trust = %trust,
            rows = table.row_count(),
            columns = table.column_count(),
            "Starting anonymization run"
        );

        let result = self.anonymize(table, candidates, granularity, trust);
        let score = calculate_score(table, &result.table)?;

        let report = RunReport {
            run_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            granularity,
            sensitivity,
            trust,
            candidates: candidates.to_vec(),
            applied_strategy: result.applied_strategy,
            score,
            rows: table.row_count(),
            columns: table.column_count(),
            processing_time_ms: start.elapsed().as_millis() as u64,
        };

        if let Some(logger) = &self.audit_logger {
            logger.log_run(&report, table)?;
        }

        tracing::info!(
            run_id = %report.run_id,
            strategy = report.applied_label(),
            score = report.score.score,
            duration_ms = report.processing_time_ms,
            "Anonymization run completed"
        );

        Ok(PipelineOutput {
            anonymized: result.table,
            report,
        })
    }

    /// Anonymize a single value with the cell-level candidates for a context
    ///
    /// # Errors
    ///
    /// Returns an error only if the audit record cannot be written.
    pub fn run_scalar(
        &mut self,
        value: Option<&str>,
        attribute: &str,
        sensitivity: SensitivityLevel,
        trust: TrustLevel,
    ) -> Result<SingleAnonymizationResult> {
        let candidates = strategies(Granularity::Cell, sensitivity, trust);
        let result = self.anonymize_scalar(value, attribute, candidates);

        if let Some(logger) = &self.audit_logger {
            logger.log_scalar(attribute, value.unwrap_or_default(), &result.applied_strategy())?;
        }
        Ok(result)
    }

    /// Run one candidate on `table`, returning the technique on success
    fn attempt(
        &mut self,
        table: &mut Table,
        name: &str,
        granularity: Granularity,
    ) -> TechniqueResult<Technique> {
        let technique = Technique::from_name(name).ok_or_else(|| TechniqueError::Unsupported {
            strategy: name.to_string(),
            granularity: granularity.to_string(),
        })?;

        match granularity {
            Granularity::Cell | Granularity::Column => {
                for column in 0..table.column_count() {
                    self.apply_column(table, technique, column)?;
                }
            }
            Granularity::Row => self.apply_row(table, technique)?,
            Granularity::Table => self.apply_table(table, technique)?,
        }
        Ok(technique)
    }

    fn apply_column(
        &mut self,
        table: &mut Table,
        technique: Technique,
        column: usize,
    ) -> TechniqueResult {
        let p = &self.params;
        match technique {
            Technique::FullMasking => masking::full_mask_column(table, column),
            Technique::PartialMasking => masking::partial_mask_column(table, column),
            Technique::NoiseInjection => {
                noise::inject_noise_column(table, column, p.epsilon, &mut self.rng)
            }
            Technique::CellSuppression => {
                suppression::suppress_rare_column(table, column, p.suppression_threshold)
            }
            Technique::DifferentialPrivacyColumn => {
                noise::laplace_column(table, column, p.epsilon, &mut self.rng)
            }
            Technique::TopBottomCoding => coding::top_bottom_code_column(
                table,
                column,
                p.bottom_percentile,
                p.top_percentile,
            ),
            Technique::Microaggregation => aggregation::microaggregate_column(table, column, p.k),
            Technique::Generalization => {
                generalization::generalize_column(table, column, p.generalization_bins)
            }
            Technique::Binning => generalization::bin_column(table, column, p.bin_size),
            Technique::NoTransformation => Ok(()),
            Technique::DifferentialPrivacy => Err(unsupported(technique, Granularity::Column)),
        }
    }

    fn apply_row(&mut self, table: &mut Table, technique: Technique) -> TechniqueResult {
        match technique {
            Technique::FullMasking => masking::full_mask_table(table),
            Technique::PartialMasking => masking::partial_mask_table(table),
            Technique::Microaggregation => {
                let aggregated = aggregation::microaggregate(table, self.params.k)?;
                merge_aggregated(table, aggregated)
            }
            Technique::NoTransformation => Ok(()),
            _ => Err(unsupported(technique, Granularity::Row)),
        }
    }

    fn apply_table(&mut self, table: &mut Table, technique: Technique) -> TechniqueResult {
        let p = &self.params;
        match technique {
            Technique::FullMasking => masking::full_mask_table(table),
            Technique::PartialMasking => masking::partial_mask_table(table),
            Technique::CellSuppression => {
                suppression::suppress_rare_table(table, p.suppression_threshold)
            }
            Technique::DifferentialPrivacy => {
                noise::laplace_table(table, p.epsilon, &mut self.rng)
            }
            Technique::Microaggregation => aggregation::microaggregate_table(table, p.k),
            Technique::Generalization => {
                generalization::generalize_table(table, p.generalization_bins)
            }
            Technique::NoTransformation => Ok(()),
            _ => Err(unsupported(technique, Granularity::Table)),
        }
    }

    fn apply_scalar(&mut self, technique: Technique, value: &str) -> TechniqueResult<String> {
        match technique {
            Technique::FullMasking => Ok(scalar::full_mask_value(value)),
            Technique::PartialMasking => Ok(scalar::partial_mask_value(value)),
            Technique::CellSuppression => Ok(scalar::suppress_value(value)),
            Technique::NoiseInjection => {
                scalar::noise_value(value, self.params.cell_noise_ratio, &mut self.rng)
            }
            Technique::Generalization => Ok(scalar::generalize_value(value)),
            _ => Err(unsupported(technique, Granularity::Cell)),
        }
    }
}

fn unsupported(technique: Technique, granularity: Granularity) -> TechniqueError {
    TechniqueError::Unsupported {
        strategy: technique.as_str().to_string(),
        granularity: granularity.to_string(),
    }
}

/// Fold a row-level microaggregation result back into the working table
/// Whether a name has a single-value form, direct or defaulted
fn is_scalar_candidate(name: &str) -> bool {
    Technique::from_name(name).is_some_and(|t| {
        t == Technique::NoTransformation || t.is_scalar_direct() || t.requires_cross_row_context()
    })
}

fn merge_aggregated(working: &mut Table, aggregated: Table) -> TechniqueResult {
    if aggregated.columns() == working.columns() {
        *working = aggregated;
        Ok(())
    } else if aggregated.is_empty() && !working.is_empty() {
        working.clear_rows();
        Ok(())
    } else {
        Err(TechniqueError::ShapeMismatch(format!(
            "columns [{}] vs [{}]",
            aggregated.columns().join(", "),
            working.columns().join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Value;

    fn engine() -> AnonymizationEngine {
        AnonymizationEngine::with_seed(AnonymizationConfig::default(), 11).unwrap()
    }

    fn engine_with(params: TechniqueParams) -> AnonymizationEngine {
        AnonymizationEngine {
            params,
            rng: StdRng::seed_from_u64(11),
            audit_logger: None,
        }
    }

    fn zips() -> Table {
        Table::with_rows(
            ["zip"],
            vec![vec![Value::from("12345")], vec![Value::from("67890")]],
        )
        .unwrap()
    }

    #[test]
    fn test_empty_candidates_return_input() {
        let table = zips();
        let result = engine().anonymize::<&str>(&table, &[], Granularity::Column, TrustLevel::Low);
        assert_eq!(result.table, table);
        assert_eq!(result.applied_strategy, None);
    }

    #[test]
    fn test_unknown_then_known() {
        let result = engine().anonymize(
            &zips(),
            &["k_anonymity", "partial_masking"],
            Granularity::Column,
            TrustLevel::Low,
        );
        assert_eq!(result.applied_strategy, Some(Technique::PartialMasking));
        assert_eq!(result.table.get(1, 0), Some(&Value::from("**890")));
    }

    #[test]
    fn test_failed_candidate_leaves_no_trace() {
        let params = TechniqueParams {
            epsilon: 0.0,
            ..TechniqueParams::default()
        };
        let result = engine_with(params).anonymize(
            &zips(),
            &[Technique::NoiseInjection, Technique::FullMasking],
            Granularity::Column,
            TrustLevel::Low,
        );
        assert_eq!(result.applied_strategy, Some(Technique::FullMasking));
        assert!(result.table.rows().all(|r| r[0] == Value::from("*****")));
    }

    #[test]
    fn test_unsupported_at_granularity_falls_through() {
        let result = engine().anonymize(
            &zips(),
            &[Technique::Binning, Technique::NoTransformation],
            Granularity::Row,
            TrustLevel::Low,
        );
        assert_eq!(result.applied_strategy, Some(Technique::NoTransformation));
        assert_eq!(result.table, zips());
    }

    #[test]
    fn test_unknown_granularity_by_name() {
        let result = engine().anonymize_by_name(
            &zips(),
            &["full_masking"],
            "dataset",
            TrustLevel::Low,
        );
        assert_eq!(result.applied_strategy, None);
        assert_eq!(result.table, zips());
    }

    #[test]
    fn test_merge_aggregated() {
        let mut working = zips();
        let replacement =
            Table::with_rows(["zip"], vec![vec![Value::from("x")], vec![Value::from("y")]])
                .unwrap();
        merge_aggregated(&mut working, replacement.clone()).unwrap();
        assert_eq!(working, replacement);

        let mut working = zips();
        merge_aggregated(&mut working, Table::new(["other"]).unwrap()).unwrap();
        assert!(working.is_empty());

        let mut working = zips();
        let wrong = Table::with_rows(["other"], vec![vec![Value::from(1)]]).unwrap();
        assert!(matches!(
            merge_aggregated(&mut working, wrong),
            Err(TechniqueError::ShapeMismatch(_))
        ));
        assert_eq!(working, zips());
    }

    #[test]
    fn test_scalar_labels() {
        assert_eq!(
            ScalarStrategy::Defaulted {
                requested: Technique::Binning
            }
            .to_string(),
            "binning_defaulted_to_partial_masking"
        );
        assert_eq!(
            ScalarStrategy::Applied(Technique::NoTransformation).label(),
            "no_transformation"
        );
        assert_eq!(
            ScalarStrategy::UnknownNoOp {
                name: "shuffle".to_string()
            }
            .label(),
            "shuffle_unknown_no_op"
        );
    }

    #[test]
    fn test_scalar_blank_input() {
        let mut engine = engine();
        let result = engine.anonymize_scalar(Some("  "), "name", &[Technique::FullMasking]);
        assert_eq!(result.value.as_deref(), Some("  "));
        assert_eq!(result.applied_strategy(), "no_transformation_empty_input");

        let result = engine.anonymize_scalar(None, "name", &[Technique::FullMasking]);
        assert_eq!(result.value, None);
        assert_eq!(result.strategy, ScalarStrategy::EmptyInput);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = AnonymizationConfig::default();
        config.techniques.k = 0;
        assert!(matches!(
            AnonymizationEngine::new(config),
            Err(VeilError::Configuration(_))
        ));
    }
}
