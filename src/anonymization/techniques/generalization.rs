//! Generalization and binning

use super::{ensure_column, min_max, numeric_cells, numeric_columns, TechniqueResult};
use crate::domain::{Table, TechniqueError, Value};

fn group_label(index: usize) -> Value {
    Value::Text(format!("Group {}", index + 1))
}

/// Replace numeric cells with equal-width `Group N` labels
///
/// When every numeric value is the same, they all become `Group 1`. The
/// maximum always lands in the last bucket.
pub fn generalize_column(table: &mut Table, column: usize, bins: usize) -> TechniqueResult {
    ensure_column(table, column)?;
    if bins == 0 {
        return Err(TechniqueError::invalid(
            "generalization_bins",
            "must be at least 1",
        ));
    }

    let cells = numeric_cells(table, column);
    let values: Vec<f64> = cells.iter().map(|&(_, v)| v).collect();
    let Some((min, max)) = min_max(&values) else {
        return Ok(());
    };

    if min == max {
        for (row, _) in cells {
            table.set(row, column, group_label(0));
        }
        return Ok(());
    }

    // Divide before subtracting so wide ranges do not overflow
    let width = max / bins as f64 - min / bins as f64;
    if !(width.is_finite() && width > 0.0) {
        return Err(TechniqueError::invalid(
            "generalization_bins",
            format!("cannot split [{min}, {max}] into {bins} groups"),
        ));
    }

    for (row, value) in cells {
        let index = if value == max {
            bins - 1
        } else {
            ((value / width - min / width).floor() as usize).min(bins - 1)
        };
        table.set(row, column, group_label(index));
    }
    Ok(())
}

/// [`generalize_column`] over every numeric column
pub fn generalize_table(table: &mut Table, bins: usize) -> TechniqueResult {
    if bins == 0 {
        return Err(TechniqueError::invalid(
            "generalization_bins",
            "must be at least 1",
        ));
    }
    for column in numeric_columns(table) {
        generalize_column(table, column, bins)?;
    }
    Ok(())
}

/// Round numeric cells down to a multiple of `bin_size`
pub fn bin_column(table: &mut Table, column: usize, bin_size: f64) -> TechniqueResult {
    ensure_column(table, column)?;
    if !(bin_size.is_finite() && bin_size > 0.0) {
        return Err(TechniqueError::invalid(
            "bin_size",
            format!("must be positive, got {bin_size}"),
        ));
    }

    for (row, value) in numeric_cells(table, column) {
        let binned = (value / bin_size).floor() * bin_size;
        table.set(row, column, Value::Number(binned));
    }
    Ok(())
}
