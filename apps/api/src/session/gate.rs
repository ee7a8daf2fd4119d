use std::sync::Arc;

use tracing::debug;

use super::{Session, SessionId, SessionStore};
use crate::errors::AppError;

/// Where a session stands on the way to using the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    NoCredential,
    CredentialSet,
    Ready,
}

/// What a Ready session hands to the completion provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadyCredentials {
    pub api_key: String,
    pub model: String,
}

/// Guards one session. Every mutation is written through to the store.
///
/// `NoCredential` → `CredentialSet` on `set_credential`, → `Ready` once a
/// model is also set. `clear_credential` always returns to `NoCredential`
/// but keeps the model, so entering a key again goes straight to `Ready`.
pub struct SessionGate {
    id: SessionId,
    session: Session,
    store: Arc<dyn SessionStore>,
}

impl SessionGate {
    /// Loads the session for `id`. An unstored id starts from a session seeded
    /// with `default_credential`; nothing is saved until a mutation commits.
    pub fn load(
        id: SessionId,
        store: Arc<dyn SessionStore>,
        default_credential: Option<String>,
    ) -> Self {
        let session = store
            .load(id)
            .unwrap_or_else(|| Session::new(default_credential));
        Self { id, session, store }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn has_credential(&self) -> bool {
        present(&self.session.credential).is_some()
    }

    pub fn has_model(&self) -> bool {
        present(&self.session.selected_model).is_some()
    }

    pub fn selected_model(&self) -> Option<&str> {
        present(&self.session.selected_model)
    }

    pub fn state(&self) -> GateState {
        match (self.has_credential(), self.has_model()) {
            (false, _) => GateState::NoCredential,
            (true, false) => GateState::CredentialSet,
            (true, true) => GateState::Ready,
        }
    }

    pub fn set_credential(&mut self, credential: String) {
        self.session.credential = normalize(credential);
        self.commit();
    }

    pub fn set_model(&mut self, model: String) {
        self.session.selected_model = normalize(model);
        self.commit();
    }

    pub fn clear_credential(&mut self) {
        self.session.credential = None;
        self.commit();
    }

    /// The session's API key, or the redirect that asks for one.
    pub fn require_credential(&self) -> Result<String, AppError> {
        present(&self.session.credential)
            .map(str::to_string)
            .ok_or(AppError::MissingCredential)
    }

    /// Key and model for an LLM call, or the redirect to whichever step is missing.
    pub fn require_ready(&self) -> Result<ReadyCredentials, AppError> {
        let api_key = self.require_credential()?;
        let model = self
            .selected_model()
            .ok_or(AppError::MissingModelSelection)?
            .to_string();
        Ok(ReadyCredentials { api_key, model })
    }

    fn commit(&self) {
        debug!(session = %self.id, state = ?self.state(), "Session updated");
        self.store.save(self.id, self.session.clone());
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

fn normalize(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
