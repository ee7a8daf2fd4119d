use std::sync::Arc;

use anyhow::anyhow;
use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::debug;

use super::{ReadyCredentials, SessionGate, SessionId};
use crate::errors::AppError;
use crate::state::AppState;

/// Middleware that binds the session cookie to a [`SessionId`].
///
/// A known cookie resolves to its stored session. Otherwise the request gets
/// a fresh id that is only stored (and sent back as `Set-Cookie`) if a
/// handler commits a [`SessionGate`] change, so read-only and cookieless
/// requests allocate nothing. The id goes into request extensions for the
/// extractors below.
pub async fn attach_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let cookie_name = state.config.session_cookie.clone();

    let known = jar
        .get(&cookie_name)
        .and_then(|c| c.value().parse::<SessionId>().ok())
        .filter(|id| state.sessions.load(*id).is_some());

    let (id, fresh) = match known {
        Some(id) => (id, false),
        None => (SessionId::new(), true),
    };

    request.extensions_mut().insert(id);
    let response = next.run(request).await;

    if !(fresh && state.sessions.load(id).is_some()) {
        return response;
    }

    debug!(session = %id, "Created session");
    let cookie = Cookie::build((cookie_name, id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    (jar.add(cookie), response).into_response()
}

fn session_id(parts: &Parts) -> Result<SessionId, AppError> {
    parts
        .extensions
        .get::<SessionId>()
        .copied()
        .ok_or_else(|| AppError::Internal(anyhow!("session middleware is not installed")))
}

#[async_trait]
impl FromRequestParts<AppState> for SessionGate {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let id = session_id(parts)?;
        Ok(SessionGate::load(
            id,
            Arc::clone(&state.sessions),
            state.config.openai_api_key.clone(),
        ))
    }
}

/// Extractor for handlers that call the LLM. Rejects with the redirect to
/// the missing step before the request body is read.
#[derive(Debug)]
pub struct ReadySession(pub ReadyCredentials);

#[async_trait]
impl FromRequestParts<AppState> for ReadySession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let gate = SessionGate::from_request_parts(parts, state).await?;
        gate.require_ready().map(ReadySession)
    }
}
