pub mod api;
pub mod health;
pub mod pages;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::session::attach_session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Session setup and dashboard
        .route(
            "/api_key",
            get(pages::handle_api_key_form).post(pages::handle_submit_api_key),
        )
        .route(
            "/select_model",
            get(pages::handle_select_model_form).post(pages::handle_submit_model),
        )
        .route("/", get(pages::handle_dashboard))
        .route("/logout", get(pages::handle_logout))
        // Dashboard JSON API
        .route("/get_location", post(api::handle_get_location))
        .route("/get_history", post(api::handle_get_history))
        .route("/handle_selected_text", post(api::handle_selected_text))
        .layer(middleware::from_fn_with_state(state.clone(), attach_session))
        // Health check stays outside the session layer
        .route("/health", get(health::health_handler))
        .with_state(state)
}
