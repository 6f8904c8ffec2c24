//! Anonymization orchestration
//!
//! This module provides the [`AnonymizationOrchestrator`], the single entry
//! point that sequences detection, filtering, operator resolution, and
//! redaction for one request.
//!
//! # Architecture
//!
//! The orchestrator coordinates:
//! - **EngineContext**: supplies the detector/redactor handles, or fails the
//!   request with `ServiceUnavailable` before any work happens
//! - **Detector**: produces entity spans for the text
//! - **EntityFilter / OperatorResolver**: narrow the spans and pick the
//!   rewrite operator
//! - **Redactor**: produces the anonymized text
//!
//! Detection and redaction are blocking, CPU-bound calls; they run on the
//! blocking thread pool (`tokio::task::spawn_blocking`) so a slow analysis
//! never stalls the request-dispatch loop. Nothing here retries, and no
//! state outside the request is written.

use crate::anonymization::filter::filter_entities;
use crate::anonymization::lifecycle::EngineContext;
use crate::anonymization::operators::resolve_operators;
use crate::anonymization::validation::ValidatedRequest;
use crate::domain::errors::VeilError;
use crate::domain::response::AnonymizeResponse;
use crate::domain::result::Result;
use std::sync::Arc;
use std::time::Instant;

/// Sequences one anonymization request end to end
///
/// Thread-safe and shared across all in-flight requests; the engine context
/// is injected at construction and read-only afterwards.
pub struct AnonymizationOrchestrator {
    engines: Arc<EngineContext>,
}

impl AnonymizationOrchestrator {
    /// Create an orchestrator around the given engine context
    pub fn new(engines: Arc<EngineContext>) -> Self {
        Self { engines }
    }

    /// Anonymize a validated request
    ///
    /// # Errors
    ///
    /// - [`VeilError::ServiceUnavailable`] when either engine handle is
    ///   missing (checked before any processing)
    /// - [`VeilError::Analysis`] when the detector fails
    /// - [`VeilError::Validation`] when operator resolution rejects the
    ///   config (reserved strategy, unknown hash algorithm)
    /// - [`VeilError::Redaction`] when the redactor fails
    pub async fn anonymize(&self, validated: ValidatedRequest) -> Result<AnonymizeResponse> {
        let start = Instant::now();

        // Step 1: both handles up front; a half-available service must not
        // run detection it can never redact
        let detector = self.engines.detector()?;
        let redactor = self.engines.redactor()?;

        let ValidatedRequest { request, language } = validated;
        let text = request.text;
        let original_length = text.chars().count();

        // Step 2: detection on the blocking pool
        let detect_text = text.clone();
        let detect_language = language.clone();
        let detected = tokio::task::spawn_blocking(move || {
            detector.analyze(&detect_text, &detect_language)
        })
        .await
        .map_err(|e| VeilError::Analysis(format!("detection task failed: {e}")))?
        .map_err(|e| match e {
            VeilError::Analysis(_) => e,
            other => VeilError::Analysis(other.to_string()),
        })?;

        tracing::debug!(
            detected = detected.len(),
            language = %language,
            "Detection complete"
        );

        // Steps 3 and 4: filter to the requested entity types, then resolve
        // the operator map; absent config means no operator override
        let requested_types = request
            .config
            .as_ref()
            .and_then(|c| c.entities_to_anonymize.as_ref());
        let filtered = filter_entities(detected, requested_types);

        let operators = match request.config.as_ref() {
            Some(config) => Some(resolve_operators(config)?),
            None => None,
        };

        // Step 5: redaction on the blocking pool
        let redact_text = text.clone();
        let redact_entities = filtered.clone();
        let redact_operators = operators.clone();
        let anonymized_text = tokio::task::spawn_blocking(move || {
            redactor.anonymize(&redact_text, &redact_entities, redact_operators.as_ref())
        })
        .await
        .map_err(|e| VeilError::Redaction(format!("redaction task failed: {e}")))?
        .map_err(|e| match e {
            VeilError::Redaction(_) => e,
            other => VeilError::Redaction(other.to_string()),
        })?;

        // Steps 6-8: response from the filtered set, spans sliced from the
        // untouched input; lengths are character counts
        let anonymized_length = anonymized_text.chars().count();
        let processing_time_ms = start.elapsed().as_secs_f64() * 1000.0;

        Ok(AnonymizeResponse {
            anonymized_text,
            detected_entities: filtered,
            processing_time_ms,
            original_length,
            anonymized_length,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anonymization::detector::Detector;
    use crate::anonymization::redactor::{Redactor, SpanRedactor};
    use crate::anonymization::validation::ValidatedRequest;
    use crate::domain::entity::DetectedEntity;
    use crate::domain::request::{AnonymizationConfig, AnonymizeRequest, Strategy};
    use std::collections::HashSet;

    struct FixedDetector {
        entities: Vec<DetectedEntity>,
    }

    impl Detector for FixedDetector {
        fn analyze(&self, _text: &str, _language: &str) -> crate::domain::Result<Vec<DetectedEntity>> {
            Ok(self.entities.clone())
        }
    }

    struct FailingDetector;

    impl Detector for FailingDetector {
        fn analyze(&self, _text: &str, _language: &str) -> crate::domain::Result<Vec<DetectedEntity>> {
            Err(VeilError::Analysis("model unavailable".to_string()))
        }
    }

    struct FailingRedactor;

    impl Redactor for FailingRedactor {
        fn anonymize(
            &self,
            _text: &str,
            _entities: &[DetectedEntity],
            _operators: Option<&crate::anonymization::operators::OperatorMap>,
        ) -> crate::domain::Result<String> {
            Err(VeilError::Redaction("rewrite buffer overflow".to_string()))
        }
    }

    fn validated(text: &str, config: Option<AnonymizationConfig>) -> ValidatedRequest {
        ValidatedRequest {
            request: AnonymizeRequest {
                text: text.to_string(),
                language: Some("en".to_string()),
                config,
            },
            language: "en".to_string(),
        }
    }

    fn orchestrator_with(
        detector: impl Detector + 'static,
        redactor: impl Redactor + 'static,
    ) -> AnonymizationOrchestrator {
        AnonymizationOrchestrator::new(Arc::new(EngineContext::with_engines(
            Arc::new(detector),
            Arc::new(redactor),
        )))
    }

    fn scenario_a_entities(text: &str) -> Vec<DetectedEntity> {
        vec![
            DetectedEntity::new("PERSON", 0, 8, 0.85, text),
            DetectedEntity::new("EMAIL_ADDRESS", 18, 34, 0.95, text),
        ]
    }

    #[tokio::test]
    async fn test_no_config_uses_default_replacement() {
        let text = "John Doe email is john@example.com";
        let orchestrator = orchestrator_with(
            FixedDetector {
                entities: scenario_a_entities(text),
            },
            SpanRedactor::new("<ANONYMIZED>"),
        );

        let response = orchestrator.anonymize(validated(text, None)).await.unwrap();

        assert_eq!(response.detected_entities.len(), 2);
        assert_eq!(response.detected_entities[0].text, "John Doe");
        assert_eq!(response.detected_entities[1].text, "john@example.com");
        assert_eq!(
            response.anonymized_text,
            "<ANONYMIZED> email is <ANONYMIZED>"
        );
        assert_eq!(response.original_length, text.chars().count());
        assert_eq!(
            response.anonymized_length,
            response.anonymized_text.chars().count()
        );
        assert!(response.processing_time_ms >= 0.0);
    }

    #[tokio::test]
    async fn test_filter_narrows_response_entities() {
        let text = "John Doe email is john@example.com";
        let orchestrator = orchestrator_with(
            FixedDetector {
                entities: scenario_a_entities(text),
            },
            SpanRedactor::new("<ANONYMIZED>"),
        );

        let config = AnonymizationConfig {
            entities_to_anonymize: Some(
                ["EMAIL_ADDRESS".to_string()].into_iter().collect::<HashSet<_>>(),
            ),
            ..Default::default()
        };
        let response = orchestrator
            .anonymize(validated(text, Some(config)))
            .await
            .unwrap();

        // Response carries the filtered set, not the raw detector output
        assert_eq!(response.detected_entities.len(), 1);
        assert_eq!(response.detected_entities[0].entity_type, "EMAIL_ADDRESS");
        assert_eq!(response.anonymized_text, "John Doe email is <ANONYMIZED>");
    }

    #[tokio::test]
    async fn test_mask_strategy_scenario() {
        let text = "word Alice word";
        let orchestrator = orchestrator_with(
            FixedDetector {
                entities: vec![DetectedEntity::new("PERSON", 5, 10, 0.9, text)],
            },
            SpanRedactor::new("<ANONYMIZED>"),
        );

        let config = AnonymizationConfig {
            strategy: Strategy::Mask,
            mask_char: '#',
            ..Default::default()
        };
        let response = orchestrator
            .anonymize(validated(text, Some(config)))
            .await
            .unwrap();
        assert_eq!(response.anonymized_text, "word ##### word");
    }

    #[tokio::test]
    async fn test_hash_strategy_is_deterministic() {
        let text = "mail john@example.com ok";
        let config = AnonymizationConfig {
            strategy: Strategy::Hash,
            ..Default::default()
        };

        let mut outputs = Vec::new();
        for _ in 0..2 {
            let orchestrator = orchestrator_with(
                FixedDetector {
                    entities: vec![DetectedEntity::new("EMAIL_ADDRESS", 5, 21, 0.95, text)],
                },
                SpanRedactor::new("<ANONYMIZED>"),
            );
            let response = orchestrator
                .anonymize(validated(text, Some(config.clone())))
                .await
                .unwrap();
            outputs.push(response.anonymized_text);
        }
        assert_eq!(outputs[0], outputs[1]);
    }

    #[tokio::test]
    async fn test_uninitialized_engines_fail_before_processing() {
        let orchestrator =
            AnonymizationOrchestrator::new(Arc::new(EngineContext::uninitialized()));
        let err = orchestrator
            .anonymize(validated("some text", None))
            .await
            .unwrap_err();
        assert!(matches!(err, VeilError::ServiceUnavailable(_)));
    }

    #[tokio::test]
    async fn test_detector_failure_surfaces_as_analysis() {
        let orchestrator = orchestrator_with(FailingDetector, SpanRedactor::new("<ANONYMIZED>"));
        let err = orchestrator
            .anonymize(validated("some text", None))
            .await
            .unwrap_err();
        assert!(matches!(err, VeilError::Analysis(_)));
        assert!(err.to_string().contains("model unavailable"));
    }

    #[tokio::test]
    async fn test_redactor_failure_surfaces_as_redaction() {
        let text = "John Doe here";
        let orchestrator = orchestrator_with(
            FixedDetector {
                entities: vec![DetectedEntity::new("PERSON", 0, 8, 0.85, text)],
            },
            FailingRedactor,
        );
        let err = orchestrator.anonymize(validated(text, None)).await.unwrap_err();
        assert!(matches!(err, VeilError::Redaction(_)));
        assert!(err.to_string().contains("rewrite buffer overflow"));
    }

    #[tokio::test]
    async fn test_encrypt_config_rejected_before_redaction() {
        let text = "John Doe here";
        let orchestrator = orchestrator_with(
            FixedDetector {
                entities: vec![DetectedEntity::new("PERSON", 0, 8, 0.85, text)],
            },
            FailingRedactor,
        );
        let config = AnonymizationConfig {
            strategy: Strategy::Encrypt,
            ..Default::default()
        };
        // Resolution fails first; the failing redactor is never reached
        let err = orchestrator
            .anonymize(validated(text, Some(config)))
            .await
            .unwrap_err();
        assert!(matches!(err, VeilError::Validation(_)));
    }

    #[tokio::test]
    async fn test_lengths_track_both_texts() {
        let text = "id 123-45-6789";
        let orchestrator = orchestrator_with(
            FixedDetector {
                entities: vec![DetectedEntity::new("US_SSN", 3, 14, 0.85, text)],
            },
            SpanRedactor::new("<ANONYMIZED>"),
        );
        let config = AnonymizationConfig {
            strategy: Strategy::Redact,
            ..Default::default()
        };
        let response = orchestrator
            .anonymize(validated(text, Some(config)))
            .await
            .unwrap();
        assert_eq!(response.anonymized_text, "id ");
        assert_eq!(response.original_length, 14);
        assert_eq!(response.anonymized_length, 3);
    }
}
