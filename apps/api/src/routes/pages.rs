//! HTML routes: credential entry, model selection, dashboard, logout.

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use maud::Markup;
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::ModelCatalog;
use crate::render::{dashboard::dashboard_page, forms};
use crate::session::SessionGate;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ApiKeyForm {
    #[serde(default)]
    pub api_key: String,
}

#[derive(Debug, Deserialize)]
pub struct ModelForm {
    #[serde(default)]
    pub model: String,
}

/// GET /api_key
pub async fn handle_api_key_form() -> Markup {
    forms::api_key_page()
}

/// POST /api_key
///
/// A blank key is sent back to the form and leaves the stored key untouched.
pub async fn handle_submit_api_key(mut gate: SessionGate, Form(form): Form<ApiKeyForm>) -> Redirect {
    if form.api_key.trim().is_empty() {
        return Redirect::to("/api_key");
    }

    gate.set_credential(form.api_key);
    info!(session = %gate.id(), "API key submitted");
    Redirect::to("/")
}

/// GET /select_model
///
/// Lists the models the session's key can use. A provider failure is a 500
/// with a plain-text message.
pub async fn handle_select_model_form(
    State(state): State<AppState>,
    gate: SessionGate,
) -> Result<Markup, AppError> {
    let catalog = fetch_catalog(&state, &gate).await?;
    Ok(forms::select_model_page(&catalog, gate.selected_model()))
}

/// POST /select_model
///
/// Accepts the model only if the provider still lists it; otherwise the
/// list is shown again.
pub async fn handle_submit_model(
    State(state): State<AppState>,
    mut gate: SessionGate,
    Form(form): Form<ModelForm>,
) -> Result<Response, AppError> {
    let catalog = fetch_catalog(&state, &gate).await?;

    if catalog.contains(&form.model) {
        gate.set_model(form.model);
        info!(session = %gate.id(), model = ?gate.selected_model(), "Model selected");
        return Ok(Redirect::to("/").into_response());
    }

    Ok(forms::select_model_page(&catalog, gate.selected_model()).into_response())
}

/// GET /
pub async fn handle_dashboard(gate: SessionGate) -> Result<Markup, AppError> {
    let ready = gate.require_ready()?;
    Ok(dashboard_page(&ready.model))
}

/// GET /logout
pub async fn handle_logout(mut gate: SessionGate) -> Redirect {
    gate.clear_credential();
    info!(session = %gate.id(), "Logged out");
    Redirect::to("/")
}

async fn fetch_catalog(state: &AppState, gate: &SessionGate) -> Result<ModelCatalog, AppError> {
    let api_key = gate.require_credential()?;
    state
        .llm
        .list_models(&api_key)
        .await
        .map_err(|e| AppError::ModelListUnavailable(e.to_string()))
}
