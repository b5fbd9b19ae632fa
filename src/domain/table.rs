//! In-memory table model
//!
//! [`Table`] is the data model every technique reads and mutates: ordered,
//! unique column names and ordered rows holding one [`Value`] per column.
//!
//! Rows are stored behind [`Arc`] and mutated through [`Arc::make_mut`], so
//! cloning a table is cheap and clones never observe each other's writes.
//! The engine relies on this for its copy-on-attempt discipline.
//!
//! # Examples
//!
//! ```
//! use veil::domain::{Table, Value};
//!
//! # fn example() -> veil::domain::Result<()> {
//! let mut table = Table::new(["age", "city"])?;
//! table.push_row(vec![Value::from(34), Value::from("Gadag")])?;
//! table.push_record([("city", Value::from("Hubli"))]);
//!
//! assert_eq!(table.row_count(), 2);
//! assert_eq!(table.value(1, "age"), Some(&Value::Null));
//! # Ok(())
//! # }
//! ```

use super::errors::VeilError;
use super::result::Result;
use super::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Number of rows rendered by the `Display` implementation
const PREVIEW_ROWS: usize = 5;

/// Ordered-column, ordered-row table of cell values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TableDocument", into = "TableDocument")]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Arc<Vec<Value>>>,
}

/// Serialized form of a table
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TableDocument {
    columns: Vec<String>,
    #[serde(default)]
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create an empty table with the given columns
    ///
    /// # Errors
    ///
    /// Returns [`VeilError::InvalidInput`] if a column name appears twice.
    pub fn new<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(VeilError::InvalidInput(format!(
                    "Duplicate column name: {column}"
                )));
            }
        }

        Ok(Self {
            columns,
            rows: Vec::new(),
        })
    }

    /// Create a table from columns and positional rows
    pub fn with_rows<I, S>(columns: I, rows: Vec<Vec<Value>>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::new(columns)?;
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// Column names in order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of cells (rows × columns)
    pub fn cell_count(&self) -> usize {
        self.rows.len() * self.columns.len()
    }

    /// True when the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Append a positional row
    ///
    /// Rows shorter than the column list are padded with [`Value::Null`].
    ///
    /// # Errors
    ///
    /// Returns [`VeilError::InvalidInput`] if the row has more values than
    /// the table has columns.
    pub fn push_row(&mut self, mut values: Vec<Value>) -> Result<()> {
        if values.len() > self.columns.len() {
            return Err(VeilError::InvalidInput(format!(
                "Row has {} values but the table has {} columns",
                values.len(),
                self.columns.len()
            )));
        }
        values.resize(self.columns.len(), Value::Null);
        self.rows.push(Arc::new(values));
        Ok(())
    }

    /// Append a row given as `(column, value)` pairs
    ///
    /// Columns missing from the record become [`Value::Null`]; names that are
    /// not table columns are ignored.
    pub fn push_record<I, K, V>(&mut self, record: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let mut values = vec![Value::Null; self.columns.len()];
        for (key, value) in record {
            match self.column_index(key.as_ref()) {
                Some(idx) => values[idx] = value.into(),
                None => tracing::debug!(column = key.as_ref(), "Ignoring unknown column"),
            }
        }
        self.rows.push(Arc::new(values));
    }

    /// Cell at a row and column position
    pub fn get(&self, row: usize, column: usize) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// Cell at a row position and column name
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        self.column_index(column).and_then(|idx| self.get(row, idx))
    }

    /// Replace a cell, returning the previous value
    ///
    /// Returns `None` (and changes nothing) if the position is out of bounds.
    pub fn set(&mut self, row: usize, column: usize, value: Value) -> Option<Value> {
        let cell = self.row_mut(row)?.get_mut(column)?;
        Some(std::mem::replace(cell, value))
    }

    /// Values of one row in column order
    pub fn row(&self, row: usize) -> Option<&[Value]> {
        self.rows.get(row).map(|r| r.as_slice())
    }

    /// Mutable access to one row; detaches the row from any clone sharing it
    pub fn row_mut(&mut self, row: usize) -> Option<&mut [Value]> {
        self.rows
            .get_mut(row)
            .map(|r| Arc::make_mut(r).as_mut_slice())
    }

    /// Iterate rows in order
    pub fn rows(&self) -> impl Iterator<Item = &[Value]> + '_ {
        self.rows.iter().map(|r| r.as_slice())
    }

    /// Iterate the values of one column
    pub fn column_values(&self, column: usize) -> impl Iterator<Item = &Value> + '_ {
        self.rows.iter().filter_map(move |r| r.get(column))
    }

    /// One row as `(column, value)` pairs
    pub fn record(&self, row: usize) -> Option<impl Iterator<Item = (&str, &Value)> + '_> {
        let values = self.rows.get(row)?;
        Some(
            self.columns
                .iter()
                .map(String::as_str)
                .zip(values.iter()),
        )
    }

    /// Project the table onto the named columns
    ///
    /// Unknown names are skipped with a warning.
    pub fn subset<S: AsRef<str>>(&self, columns: &[S]) -> Table {
        let mut indices = Vec::with_capacity(columns.len());
        let mut names = Vec::with_capacity(columns.len());
        for name in columns {
            let name = name.as_ref();
            match self.column_index(name) {
                Some(idx) if !names.contains(&name) => {
                    indices.push(idx);
                    names.push(name);
                }
                Some(_) => {}
                None => tracing::warn!(column = name, "Column not found in table"),
            }
        }

        Table {
            columns: names.into_iter().map(str::to_string).collect(),
            rows: self
                .rows
                .iter()
                .map(|r| Arc::new(indices.iter().map(|&i| r[i].clone()).collect()))
                .collect(),
        }
    }

    /// Single-column projection by position
    pub fn select_column(&self, column: usize) -> Option<Table> {
        let name = self.columns.get(column)?;
        Some(self.subset(&[name.as_str()]))
    }

    /// Remove every row, keeping the columns
    pub fn clear_rows(&mut self) {
        self.rows.clear();
    }
}

impl TryFrom<TableDocument> for Table {
    type Error = VeilError;

    fn try_from(doc: TableDocument) -> Result<Self> {
        Table::with_rows(doc.columns, doc.rows)
    }
}

impl From<Table> for TableDocument {
    fn from(table: Table) -> Self {
        Self {
            columns: table.columns,
            rows: table
                .rows
                .into_iter()
                .map(|r| Arc::try_unwrap(r).unwrap_or_else(|shared| (*shared).clone()))
                .collect(),
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.columns.join("\t|\t"))?;
        writeln!(f, "{}", vec!["----"; self.columns.len()].join("\t|\t"))?;
        for row in self.rows.iter().take(PREVIEW_ROWS) {
            let cells: Vec<String> = row.iter().map(Value::to_string).collect();
            writeln!(f, "{}", cells.join("\t|\t"))?;
        }
        if self.rows.len() > PREVIEW_ROWS {
            writeln!(f, "... ({} more rows)", self.rows.len() - PREVIEW_ROWS)?;
        }
        Ok(())
    }
}
