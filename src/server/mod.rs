//! HTTP server for Veil
//!
//! Thin transport layer: route handlers decode requests, delegate to the
//! anonymization pipeline, and translate [`VeilError`](crate::domain::errors::VeilError)
//! values into status codes and JSON error bodies. No anonymization logic
//! lives here.

pub mod app;
pub mod error;
pub mod routes;

pub use app::{build_app, AppState};
