//! Top and bottom coding

use super::{ensure_column, numeric_cells, TechniqueResult};
use crate::domain::{Table, TechniqueError, Value};

/// Percentile of sorted values
///
/// Uses the position `p * (n + 1) / 100` with linear interpolation between
/// neighbours, clamped to the minimum and maximum.
pub fn percentile(sorted: &[f64], p: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    if n == 1 {
        return Some(sorted[0]);
    }

    let pos = p * (n as f64 + 1.0) / 100.0;
    if pos < 1.0 {
        return Some(sorted[0]);
    }
    if pos >= n as f64 {
        return Some(sorted[n - 1]);
    }

    let lower_pos = pos.floor();
    let fraction = pos - lower_pos;
    let lower = sorted[lower_pos as usize - 1];
    let upper = sorted[lower_pos as usize];
    Some(lower + fraction * (upper - lower))
}

/// Clamp the numeric cells of a column to its percentile bounds
pub fn top_bottom_code_column(
    table: &mut Table,
    column: usize,
    bottom_percentile: f64,
    top_percentile: f64,
) -> TechniqueResult {
    ensure_column(table, column)?;
    for (name, p) in [
        ("bottom_percentile", bottom_percentile),
        ("top_percentile", top_percentile),
    ] {
        if !(0.0..=100.0).contains(&p) {
            return Err(TechniqueError::invalid(
                name,
                format!("must be within [0, 100], got {p}"),
            ));
        }
    }
    if bottom_percentile >= top_percentile {
        return Err(TechniqueError::invalid(
            "bottom_percentile",
            format!("{bottom_percentile} is not below top_percentile {top_percentile}"),
        ));
    }

    let cells = numeric_cells(table, column);
    let mut sorted: Vec<f64> = cells.iter().map(|&(_, v)| v).collect();
    sorted.sort_by(f64::total_cmp);

    let (Some(low), Some(high)) = (
        percentile(&sorted, bottom_percentile),
        percentile(&sorted, top_percentile),
    ) else {
        return Ok(());
    };

    for (row, value) in cells {
        if value < low {
            table.set(row, column, Value::Number(low));
        } else if value > high {
            table.set(row, column, Value::Number(high));
        }
    }
    Ok(())
}
