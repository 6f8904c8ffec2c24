//! Anonymization response types

use crate::domain::entity::DetectedEntity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Successful anonymization result
///
/// Built once by the orchestrator and returned as JSON. Lengths are character
/// counts: `original_length` of the submitted text, `anonymized_length` of
/// the rewritten text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnonymizeResponse {
    /// Text with all selected spans rewritten
    pub anonymized_text: String,
    /// The filtered entity set, spans sliced from the original input
    pub detected_entities: Vec<DetectedEntity>,
    /// Wall-clock processing time, fractional milliseconds
    pub processing_time_ms: f64,
    /// Character count of the submitted text
    pub original_length: usize,
    /// Character count of the anonymized text
    pub anonymized_length: usize,
}

/// Wire error body
///
/// Every error response carries a machine-readable `kind` plus a
/// human-readable `message`. Raw internal detail never appears here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Stable error kind (e.g. `validation_error`, `service_unavailable`)
    pub kind: String,
    /// Human-readable description of the failure
    pub message: String,
}

/// Health check payload
///
/// `status` is `healthy` iff both engine handles are ready.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `healthy` or `unhealthy`
    pub status: String,
    /// Time the check ran
    pub timestamp: DateTime<Utc>,
    /// Service version
    pub version: String,
    /// Per-dependency readiness (`ready` or `unavailable`)
    pub dependencies: BTreeMap<String, String>,
}
