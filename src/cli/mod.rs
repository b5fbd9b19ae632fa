//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Veil using clap.

pub mod commands;

use crate::config::LoggingConfig;
use clap::{Parser, Subcommand};

/// Configuration file used when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "veil.toml";

/// Veil - context-aware data anonymization
#[derive(Parser, Debug)]
#[command(name = "veil")]
#[command(version, about, long_about = None)]
#[command(author = "Veil Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, env = "VEIL_CONFIG", global = true)]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "VEIL_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log level and logging configuration for this invocation
    ///
    /// `--log-level` wins over `application.log_level`. A configuration that
    /// fails to load gives console-only logging at `info`; the command
    /// reports the error itself.
    pub fn logging_settings(&self) -> (String, LoggingConfig) {
        match commands::load_settings(&self.config) {
            Ok(config) => (
                self.log_level
                    .clone()
                    .unwrap_or(config.application.log_level),
                config.logging,
            ),
            Err(_) => (
                self.log_level.clone().unwrap_or_else(|| "info".to_string()),
                LoggingConfig::default(),
            ),
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the candidate strategies for a context
    Strategies(commands::strategies::StrategiesArgs),

    /// Anonymize `attribute::value` lines one value at a time
    AnonymizeValues(commands::values::AnonymizeValuesArgs),

    /// Anonymize a JSON table and report the result
    AnonymizeTable(commands::table::AnonymizeTableArgs),

    /// Score an anonymized JSON table against its original
    Score(commands::score::ScoreArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),
}

impl Commands {
    /// Execute the selected command, returning the process exit code
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        match self {
            Commands::Strategies(args) => args.execute(),
            Commands::AnonymizeValues(args) => args.execute(config_path),
            Commands::AnonymizeTable(args) => args.execute(config_path),
            Commands::Score(args) => args.execute(),
            Commands::ValidateConfig(args) => args.execute(config_path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Granularity, SensitivityLevel, TrustLevel};

    #[test]
    fn test_cli_parse_strategies() {
        let cli = Cli::parse_from([
            "veil",
            "strategies",
            "--granularity",
            "cell",
            "--sensitivity",
            "high",
            "--trust",
            "low",
        ]);
        assert_eq!(cli.config, DEFAULT_CONFIG_PATH);
        assert!(matches!(cli.command, Commands::Strategies(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["veil", "--config", "custom.toml", "validate-config"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["veil", "validate-config", "--log-level", "debug"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_anonymize_table() {
        let cli = Cli::parse_from([
            "veil",
            "anonymize-table",
            "--input",
            "in.json",
            "--output",
            "out.json",
            "--sensitivity",
            "HIGH",
            "--trust",
            "moderate",
            "--granularity",
            "row",
        ]);
        match cli.command {
            Commands::AnonymizeTable(args) => {
                assert_eq!(args.sensitivity, Some(SensitivityLevel::High));
                assert_eq!(args.trust, TrustLevel::Moderate);
                assert_eq!(args.granularity, Some(Granularity::Row));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_logging_settings_follow_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("veil.toml");
        let log_dir = dir.path().join("logs");
        std::fs::write(
            &config,
            format!(
                "[application]\nlog_level = \"debug\"\n\n\
                 [logging]\nlocal_enabled = true\nlocal_path = \"{}\"\n\
                 local_rotation = \"hourly\"\n",
                log_dir.display()
            ),
        )
        .unwrap();
        let path = config.to_str().unwrap();

        let cli = Cli::parse_from(["veil", "--config", path, "validate-config"]);
        let (level, logging) = cli.logging_settings();
        assert_eq!(level, "debug");
        assert!(logging.local_enabled);
        assert_eq!(logging.local_path, log_dir.display().to_string());
        assert_eq!(logging.local_rotation, "hourly");

        let cli = Cli::parse_from([
            "veil",
            "--config",
            path,
            "--log-level",
            "warn",
            "validate-config",
        ]);
        assert_eq!(cli.logging_settings().0, "warn");
    }

    #[test]
    fn test_logging_settings_without_config() {
        let cli = Cli::parse_from([
            "veil",
            "--config",
            "/nonexistent/veil.toml",
            "validate-config",
        ]);
        let (level, logging) = cli.logging_settings();
        assert_eq!(level, "info");
        assert!(!logging.local_enabled);
    }

    #[test]
    fn test_cli_table_needs_sensitivity_or_assessments() {
        let base = [
            "veil",
            "anonymize-table",
            "--input",
            "in.json",
            "--output",
            "out.json",
            "--trust",
            "low",
        ];
        assert!(Cli::try_parse_from(base).is_err());

        let cli = Cli::try_parse_from(base.into_iter().chain(["--assessments", "levels.json"]))
            .unwrap();
        match cli.command {
            Commands::AnonymizeTable(args) => {
                assert_eq!(args.sensitivity, None);
                assert!(args.assessments.is_some());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_level() {
        let result = Cli::try_parse_from([
            "veil",
            "anonymize-values",
            "--input",
            "in.txt",
            "--output",
            "out.txt",
            "--sensitivity",
            "extreme",
            "--trust",
            "low",
        ]);
        assert!(result.is_err());
    }
}
