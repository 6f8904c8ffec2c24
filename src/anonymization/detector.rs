//! PII detection
//!
//! Provides the [`Detector`] trait the orchestrator consumes and a bundled
//! regex-based implementation. The trait is the seam for plugging in an
//! NLP-backed recognizer; the orchestrator never depends on how spans are
//! produced.

use crate::domain::entity::{entity_types, DetectedEntity};
use crate::domain::errors::VeilError;
use crate::domain::result::Result;
use lazy_static::lazy_static;
use regex::Regex;

/// Trait for PII detection implementations
///
/// Implementations must be safe to call concurrently from multiple requests;
/// the orchestrator shares one instance across all in-flight calls. Spans
/// are character offsets relative to `text`, in first-found order.
pub trait Detector: Send + Sync {
    /// Detect PII spans in `text`
    fn analyze(&self, text: &str, language: &str) -> Result<Vec<DetectedEntity>>;
}

lazy_static! {
    // Email pattern - RFC 5322 simplified
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"(?i)\b[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}\b"
    ).unwrap();

    // Web URLs with an explicit scheme or www prefix
    static ref URL_REGEX: Regex = Regex::new(
        r"(?i)\b(?:https?://|www\.)[A-Z0-9.-]+\.[A-Z]{2,}(?:/[^\s]*)?"
    ).unwrap();

    // Phone patterns - US and international
    static ref PHONE_REGEX: Regex = Regex::new(
        r"(?:\+?1[-.\s]?)?\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}"
    ).unwrap();

    // Social Security Number - XXX-XX-XXXX
    static ref SSN_REGEX: Regex = Regex::new(
        r"\b\d{3}-\d{2}-\d{4}\b"
    ).unwrap();

    // Credit card numbers - various formats (Visa, MC, Amex, Discover)
    static ref CREDIT_CARD_REGEX: Regex = Regex::new(
        r"\b(?:\d{4}[-\s]?){3}\d{4}\b|\b\d{4}[-\s]?\d{6}[-\s]?\d{5}\b"
    ).unwrap();

    // IPv4 addresses
    static ref IPV4_REGEX: Regex = Regex::new(
        r"\b(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\b"
    ).unwrap();
}

/// Pattern table: entity type, regex, confidence score
fn pattern_table() -> [(&'static str, &'static Regex, f32); 6] {
    [
        (entity_types::EMAIL_ADDRESS, &EMAIL_REGEX, 0.95),
        (entity_types::URL, &URL_REGEX, 0.6),
        (entity_types::IP_ADDRESS, &IPV4_REGEX, 0.95),
        (entity_types::US_SSN, &SSN_REGEX, 0.85),
        (entity_types::CREDIT_CARD, &CREDIT_CARD_REGEX, 0.8),
        (entity_types::PHONE_NUMBER, &PHONE_REGEX, 0.75),
    ]
}

/// Regex-based PII detector
///
/// Covers structured PII (emails, phones, SSNs, credit cards, IPs, URLs).
/// Free-form categories like PERSON or LOCATION need an NLP recognizer
/// behind the same trait; this implementation does not attempt them.
pub struct RegexDetector;

impl RegexDetector {
    /// Create a new regex detector
    pub fn new() -> Self {
        Self
    }
}

impl Default for RegexDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for RegexDetector {
    fn analyze(&self, text: &str, language: &str) -> Result<Vec<DetectedEntity>> {
        if text.is_empty() {
            return Err(VeilError::Analysis("cannot analyze empty text".to_string()));
        }
        tracing::debug!(language, "Running regex analysis");

        let mut entities = Vec::new();
        for (entity_type, regex, score) in pattern_table() {
            for m in regex.find_iter(text) {
                let start = byte_to_char_offset(text, m.start());
                let end = byte_to_char_offset(text, m.end());
                // Skip spans fully inside one already claimed by an earlier
                // pattern (e.g. the domain of an email re-matching as a URL)
                let contained = entities
                    .iter()
                    .any(|e: &DetectedEntity| e.start <= start && end <= e.end);
                if contained {
                    continue;
                }
                entities.push(DetectedEntity::new(entity_type, start, end, score, text));
            }
        }

        entities.sort_by_key(|e| (e.start, e.end));
        Ok(entities)
    }
}

/// Convert a byte offset into a character offset
fn byte_to_char_offset(text: &str, byte_offset: usize) -> usize {
    text[..byte_offset].chars().count()
}
