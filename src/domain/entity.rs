//! Detected entity span model
//!
//! A [`DetectedEntity`] marks where PII was found in the source text. Offsets
//! are character indices (not bytes), matching what callers see on the wire
//! and keeping spans stable for multibyte text.

use serde::{Deserialize, Serialize};

/// Entity type labels the bundled detector can produce.
///
/// The set follows the common PII recognizer vocabulary; external detectors
/// plugged in behind the [`Detector`](crate::anonymization::Detector) trait
/// may emit additional types, which flow through unchanged.
pub mod entity_types {
    pub const PERSON: &str = "PERSON";
    pub const EMAIL_ADDRESS: &str = "EMAIL_ADDRESS";
    pub const PHONE_NUMBER: &str = "PHONE_NUMBER";
    pub const CREDIT_CARD: &str = "CREDIT_CARD";
    pub const IBAN_CODE: &str = "IBAN_CODE";
    pub const IP_ADDRESS: &str = "IP_ADDRESS";
    pub const DATE_TIME: &str = "DATE_TIME";
    pub const LOCATION: &str = "LOCATION";
    pub const ORGANIZATION: &str = "ORGANIZATION";
    pub const URL: &str = "URL";
    pub const US_SSN: &str = "US_SSN";
    pub const US_PASSPORT: &str = "US_PASSPORT";
    pub const US_DRIVER_LICENSE: &str = "US_DRIVER_LICENSE";
}

/// A detected PII span
///
/// Invariant: `start <= end <= char_count(source_text)` and `text` equals the
/// character slice `[start, end)` of the untouched source. Produced by a
/// detector, read-only afterwards, discarded after response assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedEntity {
    /// Entity type label (e.g. `EMAIL_ADDRESS`)
    pub entity_type: String,
    /// Start offset in characters, inclusive
    pub start: usize,
    /// End offset in characters, exclusive
    pub end: usize,
    /// Confidence score (0.0 - 1.0)
    pub score: f32,
    /// The matched text, sliced from the original input
    pub text: String,
}

impl DetectedEntity {
    /// Create a new detected entity, slicing `text` from the source
    pub fn new(entity_type: impl Into<String>, start: usize, end: usize, score: f32, source: &str) -> Self {
        Self {
            entity_type: entity_type.into(),
            start,
            end,
            score: score.clamp(0.0, 1.0),
            text: slice_chars(source, start, end).to_string(),
        }
    }

    /// Span length in characters
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether this span overlaps another
    pub fn overlaps(&self, other: &DetectedEntity) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Slice a string by character offsets
///
/// Returns the substring covering characters `[start, end)`. Out-of-range
/// offsets are clamped to the end of the string.
pub fn slice_chars(text: &str, start: usize, end: usize) -> &str {
    let byte_start = text
        .char_indices()
        .nth(start)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    let byte_end = text
        .char_indices()
        .nth(end)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    &text[byte_start..byte_end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_slices_text_from_source() {
        let source = "John Doe email is john@example.com";
        let entity = DetectedEntity::new(entity_types::PERSON, 0, 8, 0.85, source);
        assert_eq!(entity.text, "John Doe");
        assert_eq!(entity.len(), 8);
    }

    #[test]
    fn test_entity_char_offsets_multibyte() {
        let source = "café at münchen.example.com";
        let entity = DetectedEntity::new(entity_types::URL, 8, 27, 0.6, source);
        assert_eq!(entity.text, "münchen.example.com");
    }

    #[test]
    fn test_score_clamped() {
        let entity = DetectedEntity::new(entity_types::US_SSN, 0, 1, 1.7, "x");
        assert_eq!(entity.score, 1.0);
    }

    #[test]
    fn test_overlaps() {
        let source = "abcdefghij";
        let a = DetectedEntity::new("A", 0, 5, 1.0, source);
        let b = DetectedEntity::new("B", 3, 8, 1.0, source);
        let c = DetectedEntity::new("C", 5, 9, 1.0, source);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_slice_chars_ascii() {
        assert_eq!(slice_chars("hello world", 6, 11), "world");
    }

    #[test]
    fn test_slice_chars_out_of_range_clamps() {
        assert_eq!(slice_chars("abc", 1, 99), "bc");
        assert_eq!(slice_chars("abc", 99, 100), "");
    }

    #[test]
    fn test_serialization_shape() {
        let entity = DetectedEntity::new(entity_types::EMAIL_ADDRESS, 18, 34, 0.95, "John Doe email is john@example.com");
        let json = serde_json::to_value(&entity).unwrap();
        assert_eq!(json["entity_type"], "EMAIL_ADDRESS");
        assert_eq!(json["start"], 18);
        assert_eq!(json["end"], 34);
        assert_eq!(json["text"], "john@example.com");
    }
}
