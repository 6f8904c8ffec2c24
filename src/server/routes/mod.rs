//! HTTP route handlers

pub mod anonymize;
pub mod health;

pub use anonymize::anonymize_handler;
pub use health::health_handler;
