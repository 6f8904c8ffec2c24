// Veil - PII Anonymization Service
// Copyright (c) 2025 Veil Contributors
// Licensed under the MIT License

//! # Veil - PII Anonymization Service
//!
//! Veil is an HTTP service that detects personally identifiable information
//! in free-form text and rewrites it according to a caller-selected strategy
//! (replace, redact, mask, or hash).
//!
//! ## Architecture
//!
//! Veil follows a layered architecture:
//!
//! - [`server`] - HTTP transport (axum router, handlers, error translation)
//! - [`anonymization`] - The pipeline: validation, detection, filtering,
//!   operator resolution, redaction, engine lifecycle
//! - [`domain`] - Core domain types (requests, responses, entities, errors)
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use veil::anonymization::EngineContext;
//! use veil::config::load_default_config;
//! use veil::server::build_app;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_default_config()?;
//!     let engines = Arc::new(EngineContext::initialize(&config.anonymization)?);
//!     let app = build_app(&config, engines);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Veil uses the [`domain::errors::VeilError`] type for all errors; the HTTP
//! layer maps each variant onto a status code and a stable machine-readable
//! `kind`:
//!
//! ```rust,no_run
//! use veil::domain::errors::VeilError;
//!
//! fn example() -> Result<(), VeilError> {
//!     let config = veil::config::load_default_config()?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Veil uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn, error};
//!
//! # let err = "engine offline";
//! info!("Server started");
//! warn!(entity_type = "US_SSN", "Skipping overlapping span");
//! error!(error = ?err, "Detection failed");
//! ```

pub mod anonymization;
pub mod config;
pub mod domain;
pub mod logging;
pub mod server;
