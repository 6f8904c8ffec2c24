//! Anonymization module for Veil
//!
//! This module provides PII detection and anonymization for free-form text.
//! Requests flow through a fixed pipeline; each stage is a separate submodule
//! and the orchestrator is the only caller that sees all of them.
//!
//! # Architecture
//!
//! The anonymization pipeline consists of:
//! - **Validation**: length, language, and strategy-config checks
//! - **Detection**: regex-based PII detection behind the [`Detector`] trait
//! - **Filtering**: narrowing detected spans to the requested entity types
//! - **Operators**: strategy resolution (replace, redact, mask, hash)
//! - **Redaction**: offset-safe span rewriting behind the [`Redactor`] trait
//! - **Lifecycle**: process-wide engine handles, initialized once at startup
//!
//! # Usage
//!
//! ```rust,ignore
//! use veil::anonymization::{AnonymizationOrchestrator, EngineContext, validate_request};
//!
//! let engines = Arc::new(EngineContext::initialize(&settings)?);
//! let orchestrator = AnonymizationOrchestrator::new(engines);
//! let validated = validate_request(request, &settings)?;
//! let response = orchestrator.anonymize(validated).await?;
//! ```

pub mod detector;
pub mod filter;
pub mod lifecycle;
pub mod operators;
pub mod orchestrator;
pub mod redactor;
pub mod validation;

// Re-export main types
pub use detector::{Detector, RegexDetector};
pub use filter::filter_entities;
pub use lifecycle::EngineContext;
pub use operators::{resolve_operators, HashAlgorithm, Operator, OperatorMap};
pub use orchestrator::AnonymizationOrchestrator;
pub use redactor::{Redactor, SpanRedactor};
pub use validation::{validate_request, ValidatedRequest};
