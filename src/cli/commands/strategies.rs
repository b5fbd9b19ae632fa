//! Strategies command implementation
//!
//! Prints the ordered candidate list the selection matrix yields for a
//! context.

use super::EXIT_INPUT_ERROR;
use crate::anonymization::strategies_for;
use clap::Args;

/// Arguments for the strategies command
#[derive(Args, Debug)]
pub struct StrategiesArgs {
    /// Granularity (cell, column, row, table)
    #[arg(short, long)]
    pub granularity: String,

    /// Sensitivity level (low, moderate, high)
    #[arg(short, long)]
    pub sensitivity: String,

    /// Trust level (low, moderate, high)
    #[arg(short, long)]
    pub trust: String,
}

impl StrategiesArgs {
    /// Execute the strategies command
    pub fn execute(&self) -> anyhow::Result<i32> {
        let candidates = strategies_for(&self.granularity, &self.sensitivity, &self.trust);
        if candidates.is_empty() {
            eprintln!(
                "❌ Unknown context: granularity '{}', sensitivity '{}', trust '{}'",
                self.granularity, self.sensitivity, self.trust
            );
            return Ok(EXIT_INPUT_ERROR);
        }

        for (rank, technique) in candidates.iter().enumerate() {
            println!("{}. {technique}", rank + 1);
        }
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(granularity: &str) -> StrategiesArgs {
        StrategiesArgs {
            granularity: granularity.to_string(),
            sensitivity: "moderate".to_string(),
            trust: "moderate".to_string(),
        }
    }

    #[test]
    fn test_known_context() {
        assert_eq!(args("cell").execute().unwrap(), 0);
    }

    #[test]
    fn test_unknown_context() {
        assert_eq!(args("galaxy").execute().unwrap(), EXIT_INPUT_ERROR);
    }
}
