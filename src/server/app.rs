//! Application setup and router construction

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::anonymization::{AnonymizationOrchestrator, EngineContext};
use crate::config::{AnonymizationSettings, VeilConfig};
use crate::server::routes::{anonymize_handler, health_handler};

/// Shared application state
///
/// Cheap to clone; every field is behind an `Arc`. The engine context is
/// injected here once at startup and handlers only ever read it.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<AnonymizationSettings>,
    pub engines: Arc<EngineContext>,
    pub orchestrator: Arc<AnonymizationOrchestrator>,
}

impl AppState {
    /// Assemble the state around an engine context
    pub fn new(settings: AnonymizationSettings, engines: Arc<EngineContext>) -> Self {
        Self {
            settings: Arc::new(settings),
            orchestrator: Arc::new(AnonymizationOrchestrator::new(engines.clone())),
            engines,
        }
    }
}

/// Build the Axum application router
///
/// Takes the engine context rather than constructing it, so tests can wire in
/// substitute engines and startup controls when initialization happens.
pub fn build_app(config: &VeilConfig, engines: Arc<EngineContext>) -> Router {
    let state = AppState::new(config.anonymization.clone(), engines);
    let cors = cors_layer(&config.server.cors_origins);

    Router::new()
        .route("/anonymize", post(anonymize_handler))
        .route("/health", get(health_handler))
        .layer(Extension(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// CORS layer from the configured origin list; `*` anywhere in the list
/// means any origin
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    if origins.iter().any(|o| o == "*") {
        layer.allow_origin(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(%origin, "Ignoring unparseable CORS origin");
                    None
                }
            })
            .collect();
        layer.allow_origin(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_app_with_default_config() {
        let config = VeilConfig::default();
        let engines = Arc::new(EngineContext::initialize(&config.anonymization).unwrap());
        let _app = build_app(&config, engines);
    }

    #[test]
    fn test_cors_layer_accepts_explicit_origins() {
        let _layer = cors_layer(&[
            "https://app.example.com".to_string(),
            "http://localhost:3000".to_string(),
        ]);
    }

    #[test]
    fn test_app_state_shares_engine_context() {
        let engines = Arc::new(EngineContext::uninitialized());
        let state = AppState::new(AnonymizationSettings::default(), engines.clone());
        assert!(Arc::ptr_eq(&state.engines, &engines));
    }
}
