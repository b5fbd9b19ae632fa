//! Score command implementation

use super::{read_table, EXIT_INPUT_ERROR};
use crate::anonymization::calculate_score;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the score command
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Original JSON table
    #[arg(long)]
    pub original: PathBuf,

    /// Anonymized JSON table
    #[arg(long)]
    pub anonymized: PathBuf,
}

impl ScoreArgs {
    /// Execute the score command
    pub fn execute(&self) -> anyhow::Result<i32> {
        let tables = read_table(&self.original)
            .and_then(|original| Ok((original, read_table(&self.anonymized)?)));
        let (original, anonymized) = match tables {
            Ok(tables) => tables,
            Err(e) => {
                eprintln!("❌ {e:#}");
                return Ok(EXIT_INPUT_ERROR);
            }
        };

        match calculate_score(&original, &anonymized) {
            Ok(score) => {
                println!("Anonymization score: {:.4}", score.score);
                println!("Utility retained:    {:.4}", score.utility_retained);
                Ok(0)
            }
            Err(e) => {
                eprintln!("❌ {e}");
                Ok(EXIT_INPUT_ERROR)
            }
        }
    }
}
