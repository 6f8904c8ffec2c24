//! Request validation
//!
//! Enforces structural and semantic constraints on an incoming request
//! before any processing begins. Pure function of the request and the
//! service configuration; no side effects, and validation failures are
//! reported before any collaborator is invoked.

use crate::anonymization::operators::HashAlgorithm;
use crate::config::AnonymizationSettings;
use crate::domain::errors::VeilError;
use crate::domain::request::{AnonymizeRequest, Strategy};
use crate::domain::result::Result;

/// A request that passed validation
///
/// Carries the resolved language so downstream steps never re-check the
/// fallback logic.
#[derive(Debug, Clone)]
pub struct ValidatedRequest {
    pub request: AnonymizeRequest,
    pub language: String,
}

/// Validate a raw request against the service configuration
///
/// Checks, in order:
/// 1. text length: non-empty and at most `max_text_length` characters
///    (exactly `max_text_length` is accepted)
/// 2. language membership in `supported_languages` (omitted language falls
///    back to the configured default)
/// 3. strategy-specific config: known `hash_type`, encrypt rejected as
///    reserved
///
/// # Errors
///
/// Returns [`VeilError::Validation`] with a message echoing the violated
/// constraint.
pub fn validate_request(
    request: AnonymizeRequest,
    settings: &AnonymizationSettings,
) -> Result<ValidatedRequest> {
    let char_len = request.text.chars().count();
    if char_len == 0 {
        return Err(VeilError::Validation("text must not be empty".to_string()));
    }
    if char_len > settings.max_text_length {
        return Err(VeilError::Validation(format!(
            "text length {} exceeds the maximum of {} characters",
            char_len, settings.max_text_length
        )));
    }

    let language = request
        .language
        .clone()
        .unwrap_or_else(|| settings.default_language.clone());
    if !settings.supported_languages.contains(&language) {
        return Err(VeilError::Validation(format!(
            "Unsupported language '{}'. Supported languages: {}",
            language,
            settings.supported_languages.join(", ")
        )));
    }

    if let Some(ref config) = request.config {
        match config.strategy {
            Strategy::Hash => {
                HashAlgorithm::parse(&config.hash_type)?;
            }
            Strategy::Encrypt => {
                return Err(VeilError::Validation(
                    "The encrypt strategy is reserved and not yet supported".to_string(),
                ));
            }
            _ => {}
        }
    }

    Ok(ValidatedRequest { request, language })
}
