//! Per-user session state.
//!
//! - [`Session`]: the two fields this app keeps per user
//! - [`SessionStore`]: injected storage keyed by [`SessionId`]
//! - [`SessionGate`]: state machine deciding what a session may access
//! - [`attach_session`]: middleware binding a cookie to a stored session

mod extract;
mod gate;
mod store;

pub use extract::{attach_session, ReadySession};
pub use gate::{GateState, ReadyCredentials, SessionGate};
pub use store::{MemorySessionStore, SessionId, SessionStore};

/// A user's credential and model choice. Blank values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub credential: Option<String>,
    pub selected_model: Option<String>,
}

impl Session {
    /// Fresh session, optionally seeded with the server's default credential.
    pub fn new(default_credential: Option<String>) -> Self {
        Self {
            credential: default_credential,
            selected_model: None,
        }
    }
}
