//! Table profiling
//!
//! Derives the context the strategy matrix needs from the data itself:
//! the granularity of a table, its quasi-identifier columns and an overall
//! sensitivity level built from per-attribute assessments.

use crate::domain::{Granularity, SensitivityLevel, Table, Value};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Sensitivity assigned to one attribute by an external classifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensitivityAssessment {
    pub attribute_id: String,
    pub level: SensitivityLevel,
}

impl SensitivityAssessment {
    pub fn new(attribute_id: impl Into<String>, level: SensitivityLevel) -> Self {
        Self {
            attribute_id: attribute_id.into(),
            level,
        }
    }
}

/// Granularity implied by the shape of a table
pub fn detect_granularity(table: &Table) -> Granularity {
    match (table.row_count(), table.column_count()) {
        (rows, columns) if rows > 1 && columns > 1 => Granularity::Table,
        (rows, 1) if rows > 1 => Granularity::Column,
        (1, columns) if columns > 1 => Granularity::Row,
        _ => Granularity::Cell,
    }
}

/// Columns that are neither constant nor unique
///
/// A column qualifies when its distinct non-null count `u` satisfies
/// `1 < u < rows` and `min_ratio <= u / rows <= max_ratio`.
pub fn identify_quasi_identifiers(table: &Table, min_ratio: f64, max_ratio: f64) -> Vec<String> {
    let rows = table.row_count();
    if rows == 0 {
        return Vec::new();
    }

    table
        .columns()
        .iter()
        .enumerate()
        .filter(|&(column, _)| {
            let distinct: HashSet<String> = table
                .column_values(column)
                .filter(|v| !v.is_null())
                .map(Value::to_string)
                .collect();
            let unique = distinct.len();
            let ratio = unique as f64 / rows as f64;
            unique > 1 && unique < rows && (min_ratio..=max_ratio).contains(&ratio)
        })
        .map(|(_, name)| name.clone())
        .collect()
}

/// Attribute ids assessed as high or moderate
pub fn sensitive_attribute_ids(assessments: &[SensitivityAssessment]) -> Vec<String> {
    assessments
        .iter()
        .filter(|a| a.level >= SensitivityLevel::Moderate)
        .map(|a| a.attribute_id.clone())
        .collect()
}

/// Highest assessed level among the columns of `table`
///
/// Columns without an assessment do not contribute; a table with no
/// assessed column is `low`.
pub fn overall_sensitivity(table: &Table, assessments: &[SensitivityAssessment]) -> SensitivityLevel {
    assessments
        .iter()
        .filter(|a| table.column_index(&a.attribute_id).is_some())
        .map(|a| a.level)
        .max()
        .unwrap_or_default()
}
