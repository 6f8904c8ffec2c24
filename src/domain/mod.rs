//! Domain models and types for Veil.
//!
//! This module contains the core domain models, wire types, and error
//! taxonomy shared by the anonymization pipeline and the HTTP layer.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Entity spans** ([`DetectedEntity`]) with character-indexed offsets
//! - **Request/response types** ([`AnonymizeRequest`], [`AnonymizeResponse`])
//! - **Error types** ([`VeilError`]) with stable machine-readable kinds
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, VeilError>`]:
//!
//! ```rust
//! use veil::domain::{Result, VeilError};
//!
//! fn example() -> Result<()> {
//!     Err(VeilError::Validation("text must not be empty".to_string()))
//! }
//! ```

pub mod entity;
pub mod errors;
pub mod request;
pub mod response;
pub mod result;

// Re-export commonly used types for convenience
pub use entity::{entity_types, slice_chars, DetectedEntity};
pub use errors::VeilError;
pub use request::{AnonymizationConfig, AnonymizeRequest, Strategy};
pub use response::{AnonymizeResponse, ErrorResponse, HealthResponse};
pub use result::Result;
