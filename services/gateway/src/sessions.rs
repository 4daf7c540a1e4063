use crate::error::AppError;
use cardio_types::errors::{EngineError, SessionError};
use cardio_types::ids::SessionId;
use dashmap::DashMap;
use risk_engine::session::SessionContext;

/// Live session contexts, one per browsing session.
///
/// Sharded map: requests for different sessions never wait on each other,
/// and each session's transitions run under its own entry lock.
/// Entries live until the client ends the session; there is no expiry.
pub struct SessionStore {
    sessions: DashMap<SessionId, SessionContext>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    pub fn insert(&self, ctx: SessionContext) {
        self.sessions.insert(ctx.session_id(), ctx);
    }

    /// Run one transition against a session.
    pub fn with_session<R>(
        &self,
        session_id: SessionId,
        f: impl FnOnce(&mut SessionContext) -> Result<R, AppError>,
    ) -> Result<R, AppError> {
        let mut entry = self
            .sessions
            .get_mut(&session_id)
            .ok_or_else(|| not_found(session_id))?;
        f(entry.value_mut())
    }

    /// Detach a session; the caller decides what to report about it.
    pub fn remove(&self, session_id: SessionId) -> Result<SessionContext, AppError> {
        self.sessions
            .remove(&session_id)
            .map(|(_, ctx)| ctx)
            .ok_or_else(|| not_found(session_id))
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }
}

fn not_found(session_id: SessionId) -> AppError {
    EngineError::from(SessionError::NotFound {
        session_id: session_id.to_string(),
    })
    .into()
}
