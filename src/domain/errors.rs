//! Domain error types
//!
//! This module defines the error taxonomy for Veil. Every failure a request
//! can hit maps onto exactly one variant, so the HTTP layer can translate
//! errors into status codes without inspecting messages. No third-party
//! error types are exposed.

use thiserror::Error;

/// Main Veil error type
///
/// The variants mirror the service's failure taxonomy:
/// - [`Validation`](VeilError::Validation) rejects bad input before any
///   processing happens (4xx)
/// - [`ServiceUnavailable`](VeilError::ServiceUnavailable) means the engine
///   handles were never initialized (503, retry later)
/// - [`Analysis`](VeilError::Analysis) and [`Redaction`](VeilError::Redaction)
///   wrap collaborator failures (500, permanent for this input)
/// - [`Internal`](VeilError::Internal) is the catch-all for unanticipated
///   faults; full detail is logged, never returned
#[derive(Debug, Error)]
pub enum VeilError {
    /// Configuration-related errors (startup only)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Request validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Engine handles not initialized
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// PII detection failed
    #[error("Analysis failed: {0}")]
    Analysis(String),

    /// Text rewriting failed
    #[error("Redaction failed: {0}")]
    Redaction(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("Internal error: {0}")]
    Internal(String),
}

impl VeilError {
    /// Machine-readable error kind, stable across releases
    ///
    /// Returned in error response bodies so callers can branch on the kind
    /// instead of parsing messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration_error",
            Self::Validation(_) => "validation_error",
            Self::ServiceUnavailable(_) => "service_unavailable",
            Self::Analysis(_) => "analysis_failed",
            Self::Redaction(_) => "redaction_failed",
            Self::Io(_) => "io_error",
            Self::Serialization(_) => "serialization_error",
            Self::Internal(_) => "internal_error",
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for VeilError {
    fn from(err: std::io::Error) -> Self {
        VeilError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for VeilError {
    fn from(err: serde_json::Error) -> Self {
        VeilError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for VeilError {
    fn from(err: toml::de::Error) -> Self {
        VeilError::Configuration(format!("TOML parse error: {err}"))
    }
}
