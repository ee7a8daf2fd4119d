use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::geo::GeoError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Session-state errors become redirects to the step that fixes them; provider
/// errors become error statuses.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("No API key in session")]
    MissingCredential,

    #[error("No model selected")]
    MissingModelSelection,

    #[error("Geocoding unavailable: {0}")]
    GeocodeUnavailable(String),

    #[error("Model list unavailable: {0}")]
    ModelListUnavailable(String),

    #[error("Completion failed: {0}")]
    CompletionFailed(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<GeoError> for AppError {
    fn from(e: GeoError) -> Self {
        AppError::GeocodeUnavailable(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::MissingCredential => {
                tracing::debug!("Session has no API key, redirecting");
                return Redirect::to("/api_key").into_response();
            }
            AppError::MissingModelSelection => {
                tracing::debug!("Session has no model, redirecting");
                return Redirect::to("/select_model").into_response();
            }
            AppError::ModelListUnavailable(msg) => {
                tracing::error!("Model list error: {msg}");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error in getting models from OpenAI",
                )
                    .into_response();
            }
            AppError::GeocodeUnavailable(msg) => {
                tracing::warn!("Geocoding error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "GEOCODE_UNAVAILABLE",
                    "The location service is unavailable".to_string(),
                )
            }
            AppError::CompletionFailed(msg) => {
                tracing::error!("Completion error: {msg}");
                (StatusCode::BAD_GATEWAY, "COMPLETION_FAILED", msg.clone())
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::LOCATION;

    #[test]
    fn test_missing_credential_redirects_to_key_entry() {
        let response = AppError::MissingCredential.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/api_key");
    }

    #[test]
    fn test_missing_model_redirects_to_selection() {
        let response = AppError::MissingModelSelection.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/select_model");
    }

    #[test]
    fn test_model_list_unavailable_is_500() {
        let response = AppError::ModelListUnavailable("status 401".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_completion_failed_is_bad_gateway() {
        let response = AppError::CompletionFailed("quota exceeded".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
