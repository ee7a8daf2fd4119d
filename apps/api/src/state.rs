use std::sync::Arc;

use crate::config::Config;
use crate::geo::ReverseGeocoder;
use crate::llm_client::CompletionProvider;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Reverse geocoder. Default: Nominatim.
    pub geocoder: Arc<dyn ReverseGeocoder>,
    /// Completion provider. Default: OpenAI. Key and model come from the session.
    pub llm: Arc<dyn CompletionProvider>,
    pub sessions: Arc<dyn SessionStore>,
    pub config: Config,
}
