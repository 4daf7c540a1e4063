use risk_engine::events::SessionEvent;
use risk_engine::session::{SessionSnapshot, SubmitOutcome, View};
use serde::{Deserialize, Serialize};

/// Session state after a transition, with the events it produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    #[serde(flatten)]
    pub session: SessionSnapshot,
    pub events: Vec<SessionEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub outcome: SubmitOutcome,
    #[serde(flatten)]
    pub session: SessionSnapshot,
    pub events: Vec<SessionEvent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ViewRequest {
    pub view: View,
}

/// Static content of the about view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AboutResponse {
    pub engine: String,
    pub architecture: String,
    pub validation_method: String,
    pub classification: String,
    pub accuracy_note: String,
    pub privacy: String,
}

impl AboutResponse {
    pub fn current() -> Self {
        Self {
            engine: format!("Cardio Shield engine v{}", env!("CARGO_PKG_VERSION")),
            architecture: "Random forest ensemble over eleven clinical and lifestyle features. \
                Tree ensembles capture interactions such as elevated BMI together with rising \
                systolic pressure."
                .to_string(),
            validation_method: "Cross-Entropy Recall".to_string(),
            classification: "Academic project".to_string(),
            accuracy_note: "Educational demonstration only. Not for medical diagnosis.".to_string(),
            privacy: "Zero retention. Session data lives in memory and is discarded when the \
                session ends."
                .to_string(),
        }
    }
}
