//! Laplace noise techniques
//!
//! `noise_injection` calibrates the Laplace scale to the spread of the
//! column; the differential privacy variants use a unit sensitivity. Neither
//! tracks a privacy budget.

use super::{
    ensure_column, ensure_epsilon, min_max, numeric_cells, numeric_columns, sample_laplace,
    TechniqueResult,
};
use crate::domain::{Table, TechniqueError, Value};
use rand::Rng;

/// Lower bound for the spread of a column
const MIN_SENSITIVITY: f64 = 1e-6;

/// Multiplier applied to a lone numeric cell instead of noise
pub const SINGLE_CELL_FACTOR: f64 = 1.85;

/// Add spread-calibrated Laplace noise to the numeric cells of a column
///
/// The scale is `max(1e-6, max - min) / epsilon`. A table consisting of a
/// single numeric cell is multiplied by [`SINGLE_CELL_FACTOR`] instead.
pub fn inject_noise_column<R: Rng + ?Sized>(
    table: &mut Table,
    column: usize,
    epsilon: f64,
    rng: &mut R,
) -> TechniqueResult {
    ensure_column(table, column)?;
    ensure_epsilon(epsilon)?;

    let cells = numeric_cells(table, column);
    let values: Vec<f64> = cells.iter().map(|&(_, v)| v).collect();
    let Some((min, max)) = min_max(&values) else {
        return Ok(());
    };

    let sensitivity = (max - min).max(MIN_SENSITIVITY);
    let scale = sensitivity / epsilon;
    if !scale.is_finite() || scale == 0.0 {
        return Err(TechniqueError::invalid(
            "epsilon",
            format!("noise scale {scale} is not usable"),
        ));
    }

    if table.row_count() == 1 && table.column_count() == 1 && cells.len() == 1 {
        let (row, value) = cells[0];
        table.set(row, column, Value::Number(value * SINGLE_CELL_FACTOR));
        return Ok(());
    }

    for (row, value) in cells {
        let noisy = value + sample_laplace(rng, scale);
        table.set(row, column, Value::Number(noisy));
    }
    Ok(())
}

/// Add Laplace(0, 1/epsilon) noise to the numeric cells of a column
pub fn laplace_column<R: Rng + ?Sized>(
    table: &mut Table,
    column: usize,
    epsilon: f64,
    rng: &mut R,
) -> TechniqueResult {
    ensure_column(table, column)?;
    ensure_epsilon(epsilon)?;

    let scale = 1.0 / epsilon;
    for (row, value) in numeric_cells(table, column) {
        table.set(row, column, Value::Number(value + sample_laplace(rng, scale)));
    }
    Ok(())
}

/// [`laplace_column`] over every numeric column
pub fn laplace_table<R: Rng + ?Sized>(
    table: &mut Table,
    epsilon: f64,
    rng: &mut R,
) -> TechniqueResult {
    ensure_epsilon(epsilon)?;
    for column in numeric_columns(table) {
        laplace_column(table, column, epsilon, rng)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_single_cell_is_scaled() {
        let mut table = Table::with_rows(["v"], vec![vec![Value::from(5.0)]]).unwrap();
        inject_noise_column(&mut table, 0, 0.1, &mut rng()).unwrap();
        assert_eq!(table.get(0, 0), Some(&Value::Number(9.25)));
    }

    #[test]
    fn test_noise_changes_numbers_and_skips_text() {
        let mut table = Table::with_rows(
            ["v"],
            vec![
                vec![Value::from(10)],
                vec![Value::from("n/a")],
                vec![Value::from(20)],
            ],
        )
        .unwrap();
        inject_noise_column(&mut table, 0, 0.5, &mut rng()).unwrap();

        assert_eq!(table.get(1, 0), Some(&Value::from("n/a")));
        assert_ne!(table.get(0, 0), Some(&Value::from(10)));
        assert!(table.get(2, 0).unwrap().as_number().is_some());
    }

    #[test]
    fn test_text_column_is_noop() {
        let mut table =
            Table::with_rows(["v"], vec![vec![Value::from("a")], vec![Value::from("b")]]).unwrap();
        let before = table.clone();
        inject_noise_column(&mut table, 0, 0.1, &mut rng()).unwrap();
        assert_eq!(table, before);
    }

    #[test]
    fn test_invalid_epsilon() {
        let mut table = Table::with_rows(["v"], vec![vec![Value::from(1)]]).unwrap();
        assert!(inject_noise_column(&mut table, 0, 0.0, &mut rng()).is_err());
        assert!(laplace_column(&mut table, 0, -2.0, &mut rng()).is_err());
        assert!(laplace_table(&mut table, f64::INFINITY, &mut rng()).is_err());
    }

    #[test]
    fn test_laplace_table_only_numeric_columns() {
        let mut table = Table::with_rows(
            ["age", "name"],
            vec![
                vec![Value::from(30), Value::from("Ada")],
                vec![Value::from(40), Value::from("Alan")],
            ],
        )
        .unwrap();
        laplace_table(&mut table, 1.0, &mut rng()).unwrap();
        assert_eq!(table.get(0, 1), Some(&Value::from("Ada")));
        assert_ne!(table.get(0, 0), Some(&Value::from(30)));
    }
}
