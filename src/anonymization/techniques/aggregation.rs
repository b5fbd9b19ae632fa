//! Microaggregation
//!
//! Records are ordered by their first attribute, split into consecutive
//! groups of `k` and every value of a numeric attribute in a group is
//! replaced by the mean of the group's numeric values. The last group may hold fewer than `k` records. Record order
//! of the table itself is never changed.

use super::{ensure_column, is_numeric_column, numeric_columns, TechniqueResult};
use crate::domain::{Table, TechniqueError, Value};
use std::cmp::Ordering;

/// Sort key order: numbers, then text, then nulls
fn compare_reference(a: &Value, b: &Value) -> Ordering {
    match (a.as_number(), b.as_number()) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => match (a, b) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Null, _) => Ordering::Greater,
            (_, Value::Null) => Ordering::Less,
            _ => a.as_text().cmp(&b.as_text()),
        },
    }
}

/// Microaggregate every numeric column of a table, returning a new table
///
/// # Errors
///
/// Returns [`TechniqueError::InvalidParameter`] when `k` is 0.
pub fn microaggregate(table: &Table, k: usize) -> TechniqueResult<Table> {
    if k == 0 {
        return Err(TechniqueError::invalid("k", "must be at least 1"));
    }

    let mut result = table.clone();
    if table.is_empty() || table.column_count() == 0 {
        return Ok(result);
    }

    let mut order: Vec<usize> = (0..table.row_count()).collect();
    order.sort_by(|&a, &b| {
        let null = Value::Null;
        let left = table.get(a, 0).unwrap_or(&null);
        let right = table.get(b, 0).unwrap_or(&null);
        compare_reference(left, right)
    });

    let columns = numeric_columns(table);
    for group in order.chunks(k) {
        for &column in &columns {
            let numbers: Vec<f64> = group
                .iter()
                .filter_map(|&row| table.get(row, column)?.as_number())
                .collect();
            if numbers.is_empty() {
                continue;
            }
            // Nulls and text in the group take the mean too
            let mean = numbers.iter().sum::<f64>() / numbers.len() as f64;
            for &row in group {
                result.set(row, column, Value::Number(mean));
            }
        }
    }

    tracing::debug!(
        rows = table.row_count(),
        groups = table.row_count().div_ceil(k),
        "Microaggregated table"
    );
    Ok(result)
}

/// Microaggregate a single column in place
pub fn microaggregate_column(table: &mut Table, column: usize, k: usize) -> TechniqueResult {
    ensure_column(table, column)?;
    let projected = table
        .select_column(column)
        .ok_or_else(|| TechniqueError::ColumnNotFound(column.to_string()))?;
    let aggregated = microaggregate(&projected, k)?;
    if aggregated.row_count() != table.row_count() {
        return Err(TechniqueError::ShapeMismatch(format!(
            "aggregated column has {} rows, table has {}",
            aggregated.row_count(),
            table.row_count()
        )));
    }

    for (row, values) in aggregated.rows().enumerate() {
        if let Some(value) = values.first() {
            table.set(row, column, value.clone());
        }
    }
    Ok(())
}

/// [`microaggregate_column`] over every numeric column
pub fn microaggregate_table(table: &mut Table, k: usize) -> TechniqueResult {
    if k == 0 {
        return Err(TechniqueError::invalid("k", "must be at least 1"));
    }
    for column in 0..table.column_count() {
        if is_numeric_column(table, column) {
            microaggregate_column(table, column, k)?;
        }
    }
    Ok(())
}
