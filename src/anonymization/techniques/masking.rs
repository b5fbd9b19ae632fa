//! Full and partial masking

use super::{ensure_column, TechniqueResult};
use crate::domain::{Table, Value};

/// Replacement for every field under row and table full masking
pub const MASK_TOKEN: &str = "XXXX";

/// Replace the first half of the characters with `*`
pub fn mask_prefix(text: &str) -> String {
    let len = text.chars().count();
    let masked = len / 2;
    text.chars()
        .enumerate()
        .map(|(i, c)| if i < masked { '*' } else { c })
        .collect()
}

/// Every non-null value becomes `*` repeated to its character length
pub fn full_mask_column(table: &mut Table, column: usize) -> TechniqueResult {
    ensure_column(table, column)?;
    for row in 0..table.row_count() {
        let masked = match table.get(row, column).and_then(Value::as_text) {
            Some(text) => "*".repeat(text.chars().count()),
            None => continue,
        };
        table.set(row, column, Value::Text(masked));
    }
    Ok(())
}

/// Every field, nulls included, becomes [`MASK_TOKEN`]
pub fn full_mask_table(table: &mut Table) -> TechniqueResult {
    for row in 0..table.row_count() {
        if let Some(values) = table.row_mut(row) {
            for value in values.iter_mut() {
                *value = Value::from(MASK_TOKEN);
            }
        }
    }
    Ok(())
}

/// Mask the first half of every non-null value of a column
pub fn partial_mask_column(table: &mut Table, column: usize) -> TechniqueResult {
    ensure_column(table, column)?;
    for row in 0..table.row_count() {
        let masked = match table.get(row, column).and_then(Value::as_text) {
            Some(text) => mask_prefix(&text),
            None => continue,
        };
        table.set(row, column, Value::Text(masked));
    }
    Ok(())
}

/// Mask the first half of every non-null value of the table
pub fn partial_mask_table(table: &mut Table) -> TechniqueResult {
    for column in 0..table.column_count() {
        partial_mask_column(table, column)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes() -> Table {
        Table::with_rows(
            ["code"],
            vec![
                vec![Value::from("12345")],
                vec![Value::from("67890")],
                vec![Value::Null],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_mask_prefix() {
        assert_eq!(mask_prefix("12345"), "**345");
        assert_eq!(mask_prefix("ab"), "*b");
        assert_eq!(mask_prefix("a"), "a");
        assert_eq!(mask_prefix("Åsa"), "*sa");
    }

    #[test]
    fn test_partial_mask_column() {
        let mut table = codes();
        partial_mask_column(&mut table, 0).unwrap();
        assert_eq!(table.get(0, 0), Some(&Value::from("**345")));
        assert_eq!(table.get(1, 0), Some(&Value::from("**890")));
        assert_eq!(table.get(2, 0), Some(&Value::Null));
    }

    #[test]
    fn test_full_mask_column_keeps_length_and_nulls() {
        let mut table = codes();
        full_mask_column(&mut table, 0).unwrap();
        assert_eq!(table.get(0, 0), Some(&Value::from("*****")));
        assert_eq!(table.get(2, 0), Some(&Value::Null));
    }

    #[test]
    fn test_full_mask_column_is_idempotent() {
        let mut once = codes();
        full_mask_column(&mut once, 0).unwrap();
        let mut twice = once.clone();
        full_mask_column(&mut twice, 0).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_full_mask_numbers_use_rendered_length() {
        let mut table = Table::with_rows(["n"], vec![vec![Value::from(1200)]]).unwrap();
        full_mask_column(&mut table, 0).unwrap();
        assert_eq!(table.get(0, 0), Some(&Value::from("****")));
    }

    #[test]
    fn test_full_mask_table_includes_nulls() {
        let mut table = codes();
        full_mask_table(&mut table).unwrap();
        assert!(table.rows().all(|r| r == [Value::from(MASK_TOKEN)]));
    }

    #[test]
    fn test_missing_column() {
        let mut table = codes();
        assert!(partial_mask_column(&mut table, 3).is_err());
    }
}
