use crate::sessions::SessionStore;
use risk_engine::engine::RiskEngine;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RiskEngine>,
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    pub fn new(engine: RiskEngine) -> Self {
        Self {
            engine: Arc::new(engine),
            sessions: Arc::new(SessionStore::new()),
        }
    }
}
