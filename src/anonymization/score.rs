//! Anonymization scoring
//!
//! Compares an original table with its anonymized counterpart cell by cell.
//! Each pair contributes a distance in `[0, 1]`; the anonymization score is
//! the mean distance and the retained utility its complement.

use crate::domain::value::parse_number;
use crate::domain::{Result, Table, Value, VeilError};
use serde::{Deserialize, Serialize};

/// Anonymized cell contents that count as fully hidden
pub const SUPPRESSION_MARKERS: [&str; 4] = ["*", "****", "REDACTED", "SUPPRESSED"];

/// Score of one anonymization run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnonymizationScore {
    /// Mean per-cell distance, 0 = unchanged, 1 = fully hidden
    pub score: f64,
    /// `1 - score`
    pub utility_retained: f64,
}

impl AnonymizationScore {
    fn from_score(score: f64) -> Self {
        let score = score.clamp(0.0, 1.0);
        Self {
            score,
            utility_retained: (1.0 - score).clamp(0.0, 1.0),
        }
    }
}

impl Default for AnonymizationScore {
    fn default() -> Self {
        Self::from_score(0.0)
    }
}

/// Score `anonymized` against `original`
///
/// Anonymized cells are looked up by the original's column names; a missing
/// column reads as null.
///
/// # Errors
///
/// Returns [`VeilError::ShapeMismatch`] when row or column counts differ.
pub fn calculate_score(original: &Table, anonymized: &Table) -> Result<AnonymizationScore> {
    if original.row_count() != anonymized.row_count()
        || original.column_count() != anonymized.column_count()
    {
        return Err(VeilError::ShapeMismatch {
            original_rows: original.row_count(),
            original_columns: original.column_count(),
            anonymized_rows: anonymized.row_count(),
            anonymized_columns: anonymized.column_count(),
        });
    }

    let cells = original.cell_count();
    if cells == 0 {
        return Ok(AnonymizationScore::default());
    }

    let mapping: Vec<Option<usize>> = original
        .columns()
        .iter()
        .map(|name| anonymized.column_index(name))
        .collect();

    let null = Value::Null;
    let mut total = 0.0;
    for (row, values) in original.rows().enumerate() {
        for (column, before) in values.iter().enumerate() {
            let after = mapping[column]
                .and_then(|idx| anonymized.get(row, idx))
                .unwrap_or(&null);
            total += cell_distance(before, after);
        }
    }

    Ok(AnonymizationScore::from_score(total / cells as f64))
}

/// Distance between an original and an anonymized cell, in `[0, 1]`
pub fn cell_distance(original: &Value, anonymized: &Value) -> f64 {
    let anonymized_text = match anonymized.as_text() {
        None => return 1.0,
        Some(text) => text,
    };
    if SUPPRESSION_MARKERS.contains(&anonymized_text.trim()) {
        return 1.0;
    }

    let original_number = original.as_number();
    let anonymized_number = anonymized.as_number();
    if let (Some(o), Some(a)) = (original_number, anonymized_number) {
        if o == a {
            return 0.0;
        }
    }
    if original == anonymized {
        return 0.0;
    }

    if is_range_label(&anonymized_text) {
        return 0.5;
    }

    if let (Some(o), Some(a)) = (original_number, anonymized_number) {
        if o == 0.0 {
            return if a == 0.0 { 0.0 } else { 1.0 };
        }
        return ((o - a).abs() / o.abs()).min(1.0);
    }

    let original_text = original.as_text().unwrap_or_default();
    1.0 - normalized_similarity(&original_text, &anonymized_text)
}

/// `<number>-<number>` labels produced by range generalization
fn is_range_label(text: &str) -> bool {
    if text.starts_with('-') {
        return false;
    }
    match text.split_once('-') {
        Some((low, high)) => parse_number(low).is_some() && parse_number(high).is_some(),
        None => false,
    }
}

/// `1 - levenshtein / max_len`, 1 when both strings are empty
pub fn normalized_similarity(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f64 / longest as f64
}

/// Edit distance counting single-character insertions, deletions and substitutions
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}
