//! Configuration schema types
//!
//! This module defines the configuration structure for Veil. The structure
//! maps directly to the TOML file; every section carries serde defaults so a
//! missing file yields a fully usable development configuration.

use serde::{Deserialize, Serialize};

/// Main Veil configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VeilConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Anonymization pipeline settings
    #[serde(default)]
    pub anonymization: AnonymizationSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl VeilConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.server.validate()?;
        self.anonymization.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins; `*` means any origin
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

impl ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("server.host must not be empty".to_string());
        }
        if self.cors_origins.is_empty() {
            return Err("server.cors_origins must not be empty (use '*' to allow any origin)"
                .to_string());
        }
        Ok(())
    }
}

fn default_max_text_length() -> usize {
    10_000
}

fn default_supported_languages() -> Vec<String> {
    ["en", "es", "fr", "de", "it"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_replacement() -> String {
    "<ANONYMIZED>".to_string()
}

/// Anonymization pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnonymizationSettings {
    /// Maximum accepted text length in characters
    #[serde(default = "default_max_text_length")]
    pub max_text_length: usize,

    /// Languages the detector accepts (ISO 639-1 codes)
    #[serde(default = "default_supported_languages")]
    pub supported_languages: Vec<String>,

    /// Language assumed when the request omits one
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Replacement token used when no operator map is supplied
    #[serde(default = "default_replacement")]
    pub default_replacement: String,
}

impl Default for AnonymizationSettings {
    fn default() -> Self {
        Self {
            max_text_length: default_max_text_length(),
            supported_languages: default_supported_languages(),
            default_language: default_language(),
            default_replacement: default_replacement(),
        }
    }
}

impl AnonymizationSettings {
    fn validate(&self) -> Result<(), String> {
        if self.max_text_length == 0 {
            return Err("anonymization.max_text_length must be greater than 0".to_string());
        }
        if self.supported_languages.is_empty() {
            return Err("anonymization.supported_languages must not be empty".to_string());
        }
        for lang in &self.supported_languages {
            if lang.len() != 2 || !lang.chars().all(|c| c.is_ascii_lowercase()) {
                return Err(format!(
                    "anonymization.supported_languages entry '{lang}' is not an ISO 639-1 code"
                ));
            }
        }
        if !self.supported_languages.contains(&self.default_language) {
            return Err(format!(
                "anonymization.default_language '{}' is not in supported_languages ({})",
                self.default_language,
                self.supported_languages.join(", ")
            ));
        }
        if self.default_replacement.is_empty() {
            return Err("anonymization.default_replacement must not be empty".to_string());
        }
        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Enable JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default)]
    pub local_path: String,

    /// Rotation policy: daily or hourly
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            local_enabled: false,
            local_path: String::new(),
            local_rotation: default_local_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.level.as_str()) {
            return Err(format!(
                "Invalid logging.level '{}'. Must be one of: {}",
                self.level,
                valid_levels.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.is_empty() {
            return Err("logging.local_path is required when logging.local_enabled = true"
                .to_string());
        }
        Ok(())
    }
}
