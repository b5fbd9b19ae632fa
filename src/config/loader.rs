//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::VeilConfig;
use crate::domain::errors::VeilError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into VeilConfig
/// 4. Applies environment variable overrides (VEIL_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use veil::config::loader::load_config;
///
/// let config = load_config("veil.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<VeilConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(VeilError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        VeilError::Configuration(format!(
            "Failed to read configuration file {}: {e}",
            path.display()
        ))
    })?;

    parse_config(&contents)
}

/// Loads the file if it exists, otherwise starts from defaults
///
/// Environment overrides and validation apply in both cases.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<VeilConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(path = %path.display(), "No configuration file, using defaults");
    let mut config = VeilConfig::default();
    apply_env_overrides(&mut config)?;
    validate(&config)?;
    Ok(config)
}

/// Parses configuration text, applying substitution, overrides and validation
pub fn parse_config(contents: &str) -> Result<VeilConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: VeilConfig = toml::from_str(&contents)
        .map_err(|e| VeilError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;
    validate(&config)?;

    Ok(config)
}

fn validate(config: &VeilConfig) -> Result<()> {
    config
        .validate()
        .map_err(|e| VeilError::Configuration(format!("Configuration validation failed: {e}")))
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied verbatim.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| VeilError::Configuration(format!("Invalid placeholder pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&format!("${{{var_name}}}"), &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(VeilError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Applies environment variable overrides using VEIL_* prefix
///
/// Environment variables follow the pattern: VEIL_<SECTION>_<KEY>
/// For example: VEIL_APPLICATION_LOG_LEVEL, VEIL_ANONYMIZATION_TECHNIQUES_K
fn apply_env_overrides(config: &mut VeilConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("VEIL_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Anonymization overrides
    config.anonymization.apply_env_overrides()?;

    // Logging overrides
    if let Ok(val) = std::env::var("VEIL_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().map_err(|_| {
            VeilError::Configuration(format!("Invalid VEIL_LOGGING_LOCAL_ENABLED value: '{val}'"))
        })?;
    }
    if let Ok(val) = std::env::var("VEIL_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("VEIL_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("VEIL_LOADER_TEST_VAR", "test_value");
        let input = "path = \"${VEIL_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "path = \"test_value\"");
        std::env::remove_var("VEIL_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("VEIL_LOADER_MISSING_VAR");
        let input = "path = \"${VEIL_LOADER_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("VEIL_LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_skips_comments() {
        std::env::remove_var("VEIL_LOADER_COMMENTED_VAR");
        let input = "# path = \"${VEIL_LOADER_COMMENTED_VAR}\"\nk = 2";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, input);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent-veil.toml");
        assert!(matches!(result, Err(VeilError::Configuration(_))));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = load_or_default("nonexistent-veil.toml").unwrap();
        assert_eq!(config.anonymization.techniques.bin_size, 10.0);
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[anonymization.techniques]
epsilon = 0.5
k = 3

[anonymization.audit]
enabled = false

[logging]
local_rotation = "hourly"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.anonymization.techniques.epsilon, 0.5);
        assert_eq!(config.anonymization.techniques.k, 3);
        assert_eq!(config.anonymization.techniques.generalization_bins, 3);
        assert_eq!(config.logging.local_rotation, "hourly");
    }

    #[test]
    fn test_parse_config_invalid_values() {
        let result = parse_config("[anonymization.techniques]\nepsilon = -1.0\n");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("validation failed"));
    }
}
