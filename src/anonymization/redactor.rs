//! Text rewriting
//!
//! Provides the [`Redactor`] trait the orchestrator consumes and the bundled
//! [`SpanRedactor`] implementation. The redactor owns all offset bookkeeping:
//! spans are applied against the original text in a single left-to-right
//! pass, so a replacement whose length differs from its span never corrupts
//! the offsets of spans not yet processed.

use crate::anonymization::operators::{HashAlgorithm, Operator, OperatorMap};
use crate::domain::entity::{slice_chars, DetectedEntity};
use crate::domain::errors::VeilError;
use crate::domain::result::Result;
use sha2::{Digest, Sha256, Sha512};

/// Trait for text rewriting implementations
///
/// Must be safe to call concurrently from multiple requests. When
/// `operators` is `None`, the implementation's built-in default applies.
pub trait Redactor: Send + Sync {
    /// Rewrite `text`, applying an operator to each entity span
    fn anonymize(
        &self,
        text: &str,
        entities: &[DetectedEntity],
        operators: Option<&OperatorMap>,
    ) -> Result<String>;
}

/// Splice-based redactor
///
/// Applies the resolved operator span-by-span. Overlapping spans are not
/// merged upstream; here the first span (ordered by start, longer span
/// winning ties) is applied and any later span overlapping an
/// already-rewritten region is skipped with a warning, so no region is
/// rewritten twice.
pub struct SpanRedactor {
    default_replacement: String,
}

impl SpanRedactor {
    /// Create a redactor with the service-wide default replacement token
    pub fn new(default_replacement: impl Into<String>) -> Self {
        Self {
            default_replacement: default_replacement.into(),
        }
    }

    fn rewrite_span(&self, span_text: &str, operator: Option<&Operator>) -> String {
        match operator {
            None => self.default_replacement.clone(),
            Some(Operator::Replace { value }) => value.clone(),
            Some(Operator::Redact) => String::new(),
            Some(Operator::Mask { mask_char }) => {
                std::iter::repeat(*mask_char)
                    .take(span_text.chars().count())
                    .collect()
            }
            Some(Operator::Hash { algorithm }) => hash_digest(span_text, *algorithm),
        }
    }
}

impl Redactor for SpanRedactor {
    fn anonymize(
        &self,
        text: &str,
        entities: &[DetectedEntity],
        operators: Option<&OperatorMap>,
    ) -> Result<String> {
        if entities.is_empty() {
            return Ok(text.to_string());
        }

        for entity in entities {
            let char_len = text.chars().count();
            if entity.start > entity.end || entity.end > char_len {
                return Err(VeilError::Redaction(format!(
                    "entity span {}..{} out of bounds for text of {} characters",
                    entity.start, entity.end, char_len
                )));
            }
        }

        let mut ordered: Vec<&DetectedEntity> = entities.iter().collect();
        ordered.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

        let mut result = String::with_capacity(text.len());
        // Cursor into the original text, in characters
        let mut cursor = 0usize;

        for entity in ordered {
            if entity.start < cursor {
                tracing::warn!(
                    entity_type = %entity.entity_type,
                    start = entity.start,
                    end = entity.end,
                    "Skipping span overlapping an already-rewritten region"
                );
                continue;
            }
            result.push_str(slice_chars(text, cursor, entity.start));
            let span_text = slice_chars(text, entity.start, entity.end);
            let operator = operators.map(|map| map.operator_for(&entity.entity_type));
            result.push_str(&self.rewrite_span(span_text, operator));
            cursor = entity.end;
        }
        result.push_str(slice_chars(text, cursor, text.chars().count()));

        Ok(result)
    }
}

/// Hex digest of the span bytes
///
/// Deterministic by construction: no salt, no per-call state.
fn hash_digest(input: &str, algorithm: HashAlgorithm) -> String {
    match algorithm {
        HashAlgorithm::Sha256 => hex::encode(Sha256::digest(input.as_bytes())),
        HashAlgorithm::Sha512 => hex::encode(Sha512::digest(input.as_bytes())),
        HashAlgorithm::Md5 => hex::encode(md5::compute(input.as_bytes()).0),
    }
}
