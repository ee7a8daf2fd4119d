//! JSON routes called by the dashboard script.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::geo::resolve_location;
use crate::llm_client::prompts::{build_followup_prompt, build_history_prompt};
use crate::session::{ReadyCredentials, ReadySession};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    pub lat: f64,
    pub lon: f64,
    pub zoom: f64,
}

#[derive(Debug, Serialize)]
pub struct LocationResponse {
    pub address: String,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub location: String,
    pub year: String,
}

#[derive(Debug, Deserialize)]
pub struct FollowupQuery {
    pub location: String,
    pub year: String,
    pub previous_response: String,
    pub selected_text: String,
}

#[derive(Debug, Serialize)]
pub struct CompletionResponse {
    pub response: String,
}

/// POST /get_location
pub async fn handle_get_location(
    State(state): State<AppState>,
    Json(query): Json<LocationQuery>,
) -> Result<Json<LocationResponse>, AppError> {
    if !(query.lat.is_finite() && query.lon.is_finite() && query.zoom.is_finite()) {
        return Err(AppError::Validation(
            "lat, lon and zoom must be finite numbers".to_string(),
        ));
    }

    let address = resolve_location(state.geocoder.as_ref(), query.lat, query.lon, query.zoom).await?;
    Ok(Json(LocationResponse { address }))
}

/// POST /get_history
///
/// Ten facts about a place and period. Sessions that are not Ready are
/// redirected before the body is read.
pub async fn handle_get_history(
    State(state): State<AppState>,
    ReadySession(creds): ReadySession,
    Json(query): Json<HistoryQuery>,
) -> Result<Json<CompletionResponse>, AppError> {
    require_text("location", &query.location)?;
    require_text("year", &query.year)?;

    let prompt = build_history_prompt(query.location.trim(), query.year.trim());
    complete(&state, &creds, &prompt).await
}

/// POST /handle_selected_text
///
/// Elaborates on a passage the user highlighted in an earlier answer.
pub async fn handle_selected_text(
    State(state): State<AppState>,
    ReadySession(creds): ReadySession,
    Json(query): Json<FollowupQuery>,
) -> Result<Json<CompletionResponse>, AppError> {
    require_text("location", &query.location)?;
    require_text("year", &query.year)?;
    require_text("selected_text", &query.selected_text)?;

    let prompt = build_followup_prompt(
        query.location.trim(),
        query.year.trim(),
        &query.previous_response,
        query.selected_text.trim(),
    );
    complete(&state, &creds, &prompt).await
}

async fn complete(
    state: &AppState,
    creds: &ReadyCredentials,
    prompt: &str,
) -> Result<Json<CompletionResponse>, AppError> {
    let response = state
        .llm
        .complete(prompt, &creds.api_key, &creds.model)
        .await
        .map_err(|e| AppError::CompletionFailed(e.to_string()))?;

    Ok(Json(CompletionResponse { response }))
}

fn require_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}
