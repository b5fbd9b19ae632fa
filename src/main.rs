// Veil - Context-aware data anonymization
// Copyright (c) 2025 Veil Contributors
// Licensed under the MIT License

use clap::Parser;
use std::process;
use veil::cli::Cli;
use veil::logging::init_logging;

fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // `--log-level` wins over the configuration file
    let (log_level, logging_config) = cli.logging_settings();
    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "Veil starting");

    let exit_code = match cli.command.execute(&cli.config) {
        Ok(code) => code,
        Err(e) => {
            veil::log_error_with_context!(&e, "Command execution failed");
            eprintln!("Error: {e:#}");
            5 // Fatal error exit code
        }
    };

    // process::exit skips destructors
    drop(guard);
    process::exit(exit_code);
}
