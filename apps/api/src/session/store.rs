use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{PoisonError, RwLock};

use uuid::Uuid;

use super::Session;

/// Opaque session identifier carried in the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Storage for session records. Implementations must be safe to share
/// across request handlers.
pub trait SessionStore: Send + Sync {
    fn load(&self, id: SessionId) -> Option<Session>;
    fn save(&self, id: SessionId, session: Session);
}

/// In-process session store. Sessions live until the process exits.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<SessionId, Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self, id: SessionId) -> Option<Session> {
        let guard = self.sessions.read().unwrap_or_else(PoisonError::into_inner);
        guard.get(&id).cloned()
    }

    fn save(&self, id: SessionId, session: Session) {
        let mut guard = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        guard.insert(id, session);
    }
}
