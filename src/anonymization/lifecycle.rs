//! Engine lifecycle
//!
//! Holds the detector and redactor handles for the lifetime of the process.
//! The context is constructed exactly once during startup (Uninitialized →
//! Ready, one-way) and passed by reference into the orchestrator; nothing
//! reaches the engines through ambient global state. Handles are never
//! mutated after initialization, so concurrent reads from any number of
//! in-flight requests are plain `Arc` clones.

use crate::anonymization::detector::{Detector, RegexDetector};
use crate::anonymization::redactor::{Redactor, SpanRedactor};
use crate::config::AnonymizationSettings;
use crate::domain::errors::VeilError;
use crate::domain::result::Result;
use std::sync::Arc;

/// Shared handles to the detection and redaction engines
///
/// Either both handles are present (`Ready`) or none are; a half-initialized
/// context cannot be constructed through the public API.
pub struct EngineContext {
    detector: Option<Arc<dyn Detector>>,
    redactor: Option<Arc<dyn Redactor>>,
}

impl EngineContext {
    /// Context with no engines; every request through it fails with
    /// `ServiceUnavailable`. Exists for the startup failure path and tests.
    pub fn uninitialized() -> Self {
        Self {
            detector: None,
            redactor: None,
        }
    }

    /// Build the bundled engines from configuration
    ///
    /// Called once at startup, before the server accepts requests.
    pub fn initialize(settings: &AnonymizationSettings) -> Result<Self> {
        let detector: Arc<dyn Detector> = Arc::new(RegexDetector::new());
        let redactor: Arc<dyn Redactor> =
            Arc::new(SpanRedactor::new(settings.default_replacement.clone()));
        tracing::info!("Anonymization engines initialized");
        Ok(Self::with_engines(detector, redactor))
    }

    /// Context around caller-supplied engines (used by tests to substitute
    /// mock collaborators)
    pub fn with_engines(detector: Arc<dyn Detector>, redactor: Arc<dyn Redactor>) -> Self {
        Self {
            detector: Some(detector),
            redactor: Some(redactor),
        }
    }

    /// The detector handle
    ///
    /// # Errors
    ///
    /// Returns [`VeilError::ServiceUnavailable`] when the context was never
    /// initialized.
    pub fn detector(&self) -> Result<Arc<dyn Detector>> {
        self.detector
            .clone()
            .ok_or_else(|| VeilError::ServiceUnavailable("Detection engine not initialized".to_string()))
    }

    /// The redactor handle
    ///
    /// # Errors
    ///
    /// Returns [`VeilError::ServiceUnavailable`] when the context was never
    /// initialized.
    pub fn redactor(&self) -> Result<Arc<dyn Redactor>> {
        self.redactor
            .clone()
            .ok_or_else(|| VeilError::ServiceUnavailable("Redaction engine not initialized".to_string()))
    }

    /// Whether both engines are ready; feeds the health endpoint
    pub fn is_ready(&self) -> bool {
        self.detector.is_some() && self.redactor.is_some()
    }

    /// Per-dependency readiness labels for the health payload
    pub fn dependency_status(&self) -> [(&'static str, &'static str); 2] {
        [
            ("detector", ready_label(self.detector.is_some())),
            ("redactor", ready_label(self.redactor.is_some())),
        ]
    }
}

fn ready_label(ready: bool) -> &'static str {
    if ready {
        "ready"
    } else {
        "unavailable"
    }
}
