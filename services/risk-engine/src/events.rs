//! Session event definitions
//!
//! Every state-machine transition reports what happened as a list of
//! events. The gateway logs them; tests assert on them.

use cardio_types::assessment::RiskBand;
use cardio_types::ids::SessionId;
use cardio_types::vitals::VitalField;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::session::View;

/// Event emitted by a session transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionEvent {
    pub event_id: Uuid,
    pub session_id: SessionId,
    pub event_type: SessionEventType,
    pub timestamp: i64,
}

/// Session event type classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEventType {
    /// A vital field took a new value
    VitalUpdated { field: VitalField },
    /// Submit produced a new assessment
    AssessmentComputed { risk_probability: f64, band: RiskBand },
    /// A held assessment was discarded
    AssessmentCleared { reason: ClearReason },
    /// Submit while an assessment for the same vitals is already held
    SubmitIgnored,
    /// Active view switched
    ViewChanged { from: View, to: View },
}

/// Why an assessment was discarded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearReason {
    VitalEdited(VitalField),
    Navigation,
    Manual,
    SessionEnded,
}

impl SessionEvent {
    pub fn new(session_id: SessionId, event_type: SessionEventType, timestamp: i64) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            session_id,
            event_type,
            timestamp,
        }
    }
}

pub fn vital_updated_event(session_id: SessionId, field: VitalField, timestamp: i64) -> SessionEvent {
    SessionEvent::new(session_id, SessionEventType::VitalUpdated { field }, timestamp)
}

pub fn assessment_computed_event(
    session_id: SessionId,
    risk_probability: f64,
    band: RiskBand,
    timestamp: i64,
) -> SessionEvent {
    SessionEvent::new(
        session_id,
        SessionEventType::AssessmentComputed {
            risk_probability,
            band,
        },
        timestamp,
    )
}

pub fn assessment_cleared_event(
    session_id: SessionId,
    reason: ClearReason,
    timestamp: i64,
) -> SessionEvent {
    SessionEvent::new(session_id, SessionEventType::AssessmentCleared { reason }, timestamp)
}

pub fn submit_ignored_event(session_id: SessionId, timestamp: i64) -> SessionEvent {
    SessionEvent::new(session_id, SessionEventType::SubmitIgnored, timestamp)
}

pub fn view_changed_event(session_id: SessionId, from: View, to: View, timestamp: i64) -> SessionEvent {
    SessionEvent::new(session_id, SessionEventType::ViewChanged { from, to }, timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_has_unique_id() {
        let session = SessionId::new();
        let e1 = submit_ignored_event(session, 1708123456789000000);
        let e2 = submit_ignored_event(session, 1708123456789000000);
        assert_ne!(e1.event_id, e2.event_id);
    }

    #[test]
    fn test_cleared_event_carries_reason() {
        let event = assessment_cleared_event(
            SessionId::new(),
            ClearReason::VitalEdited(VitalField::Age),
            1708123456789000000,
        );
        assert_eq!(
            event.event_type,
            SessionEventType::AssessmentCleared {
                reason: ClearReason::VitalEdited(VitalField::Age)
            }
        );
    }

    #[test]
    fn test_event_type_wire_format() {
        let event = view_changed_event(
            SessionId::new(),
            View::Diagnostic,
            View::Analytics,
            1708123456789000000,
        );
        let json = serde_json::to_value(&event.event_type).unwrap();
        assert_eq!(json["type"], "view_changed");
        assert_eq!(json["from"], "diagnostic");
        assert_eq!(json["to"], "analytics");
    }

    #[test]
    fn test_computed_event_payload() {
        let event = assessment_computed_event(
            SessionId::new(),
            82.5,
            RiskBand::High,
            1708123456789000000,
        );
        assert!(matches!(
            event.event_type,
            SessionEventType::AssessmentComputed { band: RiskBand::High, .. }
        ));
    }
}
