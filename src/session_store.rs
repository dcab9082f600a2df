use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::{SessionId, SessionRecord};

type SessionMap = HashMap<String, SessionRecord>;

/// Session store error type
#[derive(thiserror::Error, Debug)]
pub enum SessionStoreError {
    #[error("Session store is unavailable: {0}")]
    Unavailable(String),
}

/// Storage backend for server-side sessions
///
/// Implementations are shared by every request handler, hence `Send + Sync`.
pub trait SessionStore: Send + Sync {
    /// Check whether a session exists
    fn has(&self, id: &SessionId) -> Result<bool, SessionStoreError>;

    /// Fetch a session record
    fn get(&self, id: &SessionId) -> Result<Option<SessionRecord>, SessionStoreError>;

    /// Store a session record, returning the record it replaced
    fn set(
        &self,
        id: &SessionId,
        record: SessionRecord,
    ) -> Result<Option<SessionRecord>, SessionStoreError>;

    /// Remove a session record if present, returning it
    ///
    /// Check and removal happen as a single step, so concurrent deletes of the
    /// same id see exactly one `Some`.
    fn delete(&self, id: &SessionId) -> Result<Option<SessionRecord>, SessionStoreError>;

    /// Number of stored sessions
    fn len(&self) -> Result<usize, SessionStoreError>;

    fn is_empty(&self) -> Result<bool, SessionStoreError> {
        Ok(self.len()? == 0)
    }
}

/// Process-local session store, lost on restart
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<SessionMap>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn sessions(&self) -> Result<MutexGuard<'_, SessionMap>, SessionStoreError> {
        self.sessions
            .lock()
            .map_err(|_| SessionStoreError::Unavailable("session map lock is poisoned".into()))
    }
}

impl SessionStore for InMemorySessionStore {
    fn has(&self, id: &SessionId) -> Result<bool, SessionStoreError> {
        Ok(self.sessions()?.contains_key(id.expose()))
    }

    fn get(&self, id: &SessionId) -> Result<Option<SessionRecord>, SessionStoreError> {
        Ok(self.sessions()?.get(id.expose()).cloned())
    }

    fn set(
        &self,
        id: &SessionId,
        record: SessionRecord,
    ) -> Result<Option<SessionRecord>, SessionStoreError> {
        Ok(self.sessions()?.insert(id.expose().to_owned(), record))
    }

    fn delete(&self, id: &SessionId) -> Result<Option<SessionRecord>, SessionStoreError> {
        Ok(self.sessions()?.remove(id.expose()))
    }

    fn len(&self) -> Result<usize, SessionStoreError> {
        Ok(self.sessions()?.len())
    }
}
