//! CLI command implementations
//!
//! Commands return an exit code: 0 on success, 2 for configuration errors
//! and 3 for unusable input.

pub mod score;
pub mod strategies;
pub mod table;
pub mod validate;
pub mod values;

use crate::cli::DEFAULT_CONFIG_PATH;
use crate::config::{load_config, load_or_default, VeilConfig};
use crate::domain::{Result, Table};
use anyhow::Context;
use std::path::Path;

/// Configuration error exit code
pub const EXIT_CONFIG_ERROR: i32 = 2;

/// Input error exit code
pub const EXIT_INPUT_ERROR: i32 = 3;

/// Load the configuration for a command
///
/// A missing file is only tolerated at the default path.
pub(crate) fn load_settings(config_path: &str) -> Result<VeilConfig> {
    if config_path == DEFAULT_CONFIG_PATH {
        load_or_default(config_path)
    } else {
        load_config(config_path)
    }
}

/// Read a JSON table from disk
pub(crate) fn read_table(path: &Path) -> anyhow::Result<Table> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let table = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse table in {}", path.display()))?;
    Ok(table)
}

/// Write a JSON table to disk
pub(crate) fn write_table(path: &Path, table: &Table) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(table).context("Failed to serialize table")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Value;
    use tempfile::tempdir;

    #[test]
    fn test_table_file_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("table.json");
        let table = Table::with_rows(["a"], vec![vec![Value::from("x")]]).unwrap();

        write_table(&path, &table).unwrap();
        assert_eq!(read_table(&path).unwrap(), table);
    }

    #[test]
    fn test_read_table_errors() {
        let dir = tempdir().unwrap();
        assert!(read_table(&dir.path().join("missing.json")).is_err());

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{\"columns\": 5}").unwrap();
        assert!(read_table(&bad).is_err());
    }

    #[test]
    fn test_explicit_missing_config_is_error() {
        assert!(load_settings("definitely-missing.toml").is_err());
    }
}
