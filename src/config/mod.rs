//! Configuration management
//!
//! TOML-backed configuration with `${VAR}` substitution and `VEIL_*`
//! environment variable overrides. A missing config file falls back to
//! defaults so the service can run fully environment-driven.

pub mod loader;
pub mod schema;

pub use loader::{load_config, load_default_config};
pub use schema::{AnonymizationSettings, LoggingConfig, ServerConfig, VeilConfig};
