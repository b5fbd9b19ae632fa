//! Technique library
//!
//! Mutating implementations of every technique, grouped by family. Each
//! function works on one granularity form (column, row or table) and
//! reports failures as [`TechniqueError`]; none of them perform I/O.
//!
//! Numeric techniques read cells through [`Value::as_number`] and leave
//! non-numeric cells untouched. A column without any numeric value is a
//! successful no-op.

pub mod aggregation;
pub mod coding;
pub mod generalization;
pub mod masking;
pub mod noise;
pub mod scalar;
pub mod suppression;

use crate::domain::{Table, TechniqueError, Value};
use rand::Rng;

/// Result type of the technique library
pub type TechniqueResult<T = ()> = std::result::Result<T, TechniqueError>;

/// Fails with [`TechniqueError::ColumnNotFound`] for an out-of-range index
pub(crate) fn ensure_column(table: &Table, column: usize) -> TechniqueResult {
    if column < table.column_count() {
        Ok(())
    } else {
        Err(TechniqueError::ColumnNotFound(format!(
            "index {column} (table has {} columns)",
            table.column_count()
        )))
    }
}

/// `(row, value)` pairs of the numeric cells of a column
pub(crate) fn numeric_cells(table: &Table, column: usize) -> Vec<(usize, f64)> {
    table
        .column_values(column)
        .enumerate()
        .filter_map(|(row, value)| match value.as_number() {
            Some(n) => Some((row, n)),
            None => {
                if !value.is_null() {
                    tracing::debug!(
                        column = table.columns()[column].as_str(),
                        row,
                        "Skipping non-numeric cell"
                    );
                }
                None
            }
        })
        .collect()
}

/// A column is numeric when its first non-null value is
pub fn is_numeric_column(table: &Table, column: usize) -> bool {
    table
        .column_values(column)
        .find(|v| !v.is_null())
        .is_some_and(Value::is_numeric)
}

/// Indices of the numeric columns of a table
pub(crate) fn numeric_columns(table: &Table) -> Vec<usize> {
    (0..table.column_count())
        .filter(|&c| is_numeric_column(table, c))
        .collect()
}

/// Minimum and maximum of a non-empty slice
pub(crate) fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    values.iter().fold(None, |acc, &v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Draw from Laplace(0, scale) by inverse transform sampling
pub fn sample_laplace<R: Rng + ?Sized>(rng: &mut R, scale: f64) -> f64 {
    // u in (-0.5, 0.5) keeps the logarithm finite
    let mut u: f64 = rng.gen::<f64>() - 0.5;
    while u.abs() >= 0.5 {
        u = rng.gen::<f64>() - 0.5;
    }
    -scale * u.signum() * (1.0 - 2.0 * u.abs()).ln()
}

/// Validates a Laplace privacy parameter
pub(crate) fn ensure_epsilon(epsilon: f64) -> TechniqueResult {
    if epsilon.is_finite() && epsilon > 0.0 {
        Ok(())
    } else {
        Err(TechniqueError::invalid(
            "epsilon",
            format!("must be a positive number, got {epsilon}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn mixed() -> Table {
        Table::with_rows(
            ["n", "s"],
            vec![
                vec![Value::Null, Value::from("x")],
                vec![Value::from("12"), Value::from(3)],
                vec![Value::from(4), Value::Null],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_is_numeric_column_uses_first_non_null() {
        let table = mixed();
        assert!(is_numeric_column(&table, 0));
        assert!(!is_numeric_column(&table, 1));
        assert_eq!(numeric_columns(&table), vec![0]);
    }

    #[test]
    fn test_numeric_cells() {
        let table = mixed();
        assert_eq!(numeric_cells(&table, 0), vec![(1, 12.0), (2, 4.0)]);
        assert_eq!(numeric_cells(&table, 1), vec![(1, 3.0)]);
    }

    #[test]
    fn test_ensure_column() {
        let table = mixed();
        assert!(ensure_column(&table, 1).is_ok());
        assert!(matches!(
            ensure_column(&table, 2),
            Err(TechniqueError::ColumnNotFound(_))
        ));
    }

    #[test]
    fn test_laplace_is_finite_and_centered() {
        let mut rng = StdRng::seed_from_u64(7);
        let samples: Vec<f64> = (0..5000).map(|_| sample_laplace(&mut rng, 1.0)).collect();
        assert!(samples.iter().all(|s| s.is_finite()));
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        assert!(mean.abs() < 0.1, "mean was {mean}");
    }

    #[test]
    fn test_ensure_epsilon() {
        assert!(ensure_epsilon(0.1).is_ok());
        assert!(ensure_epsilon(0.0).is_err());
        assert!(ensure_epsilon(-1.0).is_err());
        assert!(ensure_epsilon(f64::NAN).is_err());
    }
}
