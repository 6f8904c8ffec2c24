//! POST /anonymize

use axum::extract::rejection::JsonRejection;
use axum::extract::Extension;
use axum::Json;
use tracing::Instrument;
use uuid::Uuid;

use crate::anonymization::validate_request;
use crate::domain::errors::VeilError;
use crate::domain::request::AnonymizeRequest;
use crate::domain::response::AnonymizeResponse;
use crate::server::app::AppState;

/// Anonymization endpoint
///
/// Body decoding failures (malformed JSON, wrong field types, missing `text`)
/// are reported as validation errors rather than axum's default plain-text
/// rejection, so callers see one error shape for every 400.
pub async fn anonymize_handler(
    Extension(state): Extension<AppState>,
    payload: Result<Json<AnonymizeRequest>, JsonRejection>,
) -> Result<Json<AnonymizeResponse>, VeilError> {
    let Json(request) =
        payload.map_err(|rejection| VeilError::Validation(rejection.body_text()))?;

    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("anonymize", %request_id);

    async move {
        tracing::info!(
            text_length = request.text.chars().count(),
            has_config = request.config.is_some(),
            "Anonymization request received"
        );

        let validated = validate_request(request, &state.settings)?;
        let response = state.orchestrator.anonymize(validated).await?;

        tracing::info!(
            entities = response.detected_entities.len(),
            processing_time_ms = response.processing_time_ms,
            "Anonymization complete"
        );

        Ok(Json(response))
    }
    .instrument(span)
    .await
}
