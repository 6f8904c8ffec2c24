//! Configuration loader with TOML parsing and environment variable overrides
//!
//! Loading order: read the TOML file (optional), substitute `${VAR}`
//! placeholders, apply `VEIL_*` environment overrides, validate.

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
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`VeilConfig`]
/// 4. Applies environment variable overrides (`VEIL_*` prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read, TOML parsing fails, a
/// referenced environment variable is unset, or validation fails.
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
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: VeilConfig = toml::from_str(&contents)
        .map_err(|e| VeilError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        VeilError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Loads the default configuration with environment overrides applied
///
/// Used when no config file is given; the service is then entirely
/// environment-driven.
pub fn load_default_config() -> Result<VeilConfig> {
    let mut config = VeilConfig::default();
    apply_env_overrides(&mut config);
    config.validate().map_err(|e| {
        VeilError::Configuration(format!("Configuration validation failed: {}", e))
    })?;
    Ok(config)
}

/// Substitutes environment variables in the format `${VAR_NAME}`
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    // Process line by line to skip comments
    for line in input.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(VeilError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the `VEIL_*` prefix
///
/// Variables follow the pattern `VEIL_<SECTION>_<KEY>`, for example
/// `VEIL_SERVER_PORT` or `VEIL_ANONYMIZATION_MAX_TEXT_LENGTH`. List values
/// are comma-separated.
fn apply_env_overrides(config: &mut VeilConfig) {
    // Server overrides
    if let Ok(val) = std::env::var("VEIL_SERVER_HOST") {
        config.server.host = val;
    }
    if let Ok(val) = std::env::var("VEIL_SERVER_PORT") {
        if let Ok(port) = val.parse() {
            config.server.port = port;
        }
    }
    if let Ok(val) = std::env::var("VEIL_SERVER_CORS_ORIGINS") {
        config.server.cors_origins = split_list(&val);
    }

    // Anonymization overrides
    if let Ok(val) = std::env::var("VEIL_ANONYMIZATION_MAX_TEXT_LENGTH") {
        if let Ok(len) = val.parse() {
            config.anonymization.max_text_length = len;
        }
    }
    if let Ok(val) = std::env::var("VEIL_ANONYMIZATION_SUPPORTED_LANGUAGES") {
        config.anonymization.supported_languages = split_list(&val);
    }
    if let Ok(val) = std::env::var("VEIL_ANONYMIZATION_DEFAULT_LANGUAGE") {
        config.anonymization.default_language = val;
    }
    if let Ok(val) = std::env::var("VEIL_ANONYMIZATION_DEFAULT_REPLACEMENT") {
        config.anonymization.default_replacement = val;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("VEIL_LOGGING_LEVEL") {
        config.logging.level = val;
    }
    if let Ok(val) = std::env::var("VEIL_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("VEIL_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}

fn split_list(val: &str) -> Vec<String> {
    val.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("VEIL_TEST_VAR", "test_value");
        let input = "default_replacement = \"${VEIL_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "default_replacement = \"test_value\"\n");
        std::env::remove_var("VEIL_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("VEIL_MISSING_VAR");
        let input = "token = \"${VEIL_MISSING_VAR}\"";
        let result = substitute_env_vars(input);
        assert!(result.is_err());
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        std::env::remove_var("VEIL_COMMENTED_VAR");
        let input = "# token = \"${VEIL_COMMENTED_VAR}\"";
        assert!(substitute_env_vars(input).is_ok());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[server]
host = "0.0.0.0"
port = 9090
cors_origins = ["http://localhost:3000"]

[anonymization]
max_text_length = 5000
supported_languages = ["en", "fr"]
default_language = "fr"

[logging]
level = "debug"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.anonymization.max_text_length, 5000);
        assert_eq!(config.anonymization.default_language, "fr");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_load_config_invalid_values_rejected() {
        let toml_content = r#"
[anonymization]
max_text_length = 0
"#;
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let result = load_config(temp_file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list("en,es, fr"), vec!["en", "es", "fr"]);
        assert_eq!(split_list("en"), vec!["en"]);
        assert!(split_list("").is_empty());
    }
}
