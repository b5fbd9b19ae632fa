//! Frequency-based cell suppression

use super::{ensure_column, TechniqueResult};
use crate::domain::{Table, TechniqueError, Value};
use std::collections::HashMap;

/// Hashable identity of a cell value
#[derive(Debug, PartialEq, Eq, Hash)]
enum CellKey<'a> {
    Null,
    Number(u64),
    Text(&'a str),
}

impl<'a> From<&'a Value> for CellKey<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Null => Self::Null,
            // -0.0 and 0.0 are the same value
            Value::Number(n) if *n == 0.0 => Self::Number(0.0f64.to_bits()),
            Value::Number(n) => Self::Number(n.to_bits()),
            Value::Text(s) => Self::Text(s),
        }
    }
}

/// Null out values occurring fewer than `threshold` times in a column
pub fn suppress_rare_column(table: &mut Table, column: usize, threshold: usize) -> TechniqueResult {
    ensure_column(table, column)?;
    if threshold == 0 {
        return Err(TechniqueError::invalid(
            "suppression_threshold",
            "must be at least 1",
        ));
    }

    let rare_rows: Vec<usize> = {
        let mut counts: HashMap<CellKey<'_>, usize> = HashMap::new();
        for value in table.column_values(column) {
            *counts.entry(CellKey::from(value)).or_default() += 1;
        }
        table
            .column_values(column)
            .enumerate()
            .filter(|(_, value)| counts[&CellKey::from(*value)] < threshold)
            .map(|(row, _)| row)
            .collect()
    };

    for row in rare_rows {
        table.set(row, column, Value::Null);
    }
    Ok(())
}

/// [`suppress_rare_column`] over every column
pub fn suppress_rare_table(table: &mut Table, threshold: usize) -> TechniqueResult {
    for column in 0..table.column_count() {
        suppress_rare_column(table, column, threshold)?;
    }
    Ok(())
}
