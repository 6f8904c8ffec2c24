//! Anonymization request types
//!
//! Wire types for `POST /anonymize`. Deserialization applies defaults for
//! omitted fields; semantic checks (length bounds, language membership,
//! strategy support) happen afterwards in
//! [`validation`](crate::anonymization::validation).

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Anonymization strategy selected by the caller
///
/// A closed enum rather than a free-form string: strategy dispatch is
/// exhaustive at compile time, and an unknown wire value is rejected during
/// deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Replace each span with a fixed replacement string
    Replace,
    /// Drop each span entirely
    Redact,
    /// Hash each span with the configured algorithm
    Hash,
    /// Mask each span character-by-character
    Mask,
    /// Reserved: requires a key-management collaborator, currently rejected
    Encrypt,
}

impl Default for Strategy {
    fn default() -> Self {
        Self::Replace
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Replace => "replace",
            Self::Redact => "redact",
            Self::Hash => "hash",
            Self::Mask => "mask",
            Self::Encrypt => "encrypt",
        };
        f.write_str(s)
    }
}

fn default_mask_char() -> char {
    '*'
}

fn default_hash_type() -> String {
    "sha256".to_string()
}

/// Per-request anonymization configuration
///
/// Immutable once deserialized. Omitted fields take defaults; a request with
/// no config at all gets the redactor's built-in behavior (replace with the
/// service-wide default token).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnonymizationConfig {
    /// Strategy applied uniformly to every surviving entity
    #[serde(default)]
    pub strategy: Strategy,

    /// Restrict anonymization to these entity types; unset means all
    #[serde(default)]
    pub entities_to_anonymize: Option<HashSet<String>>,

    /// Replacement string for the replace strategy
    #[serde(default)]
    pub replacement_text: Option<String>,

    /// Mask character for the mask strategy
    #[serde(default = "default_mask_char")]
    pub mask_char: char,

    /// Hash algorithm name for the hash strategy (sha256, sha512, md5)
    #[serde(default = "default_hash_type")]
    pub hash_type: String,
}

impl Default for AnonymizationConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            entities_to_anonymize: None,
            replacement_text: None,
            mask_char: default_mask_char(),
            hash_type: default_hash_type(),
        }
    }
}

/// An anonymization request
///
/// Lives for the duration of one call. `language` falls back to the
/// configured default language when omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct AnonymizeRequest {
    /// Text to anonymize
    pub text: String,

    /// ISO 639-1 language code
    #[serde(default)]
    pub language: Option<String>,

    /// Optional per-request configuration
    #[serde(default)]
    pub config: Option<AnonymizationConfig>,
}
