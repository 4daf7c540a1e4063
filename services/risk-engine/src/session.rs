//! Per-session state machine
//!
//! A session holds the current form vitals and at most one assessment.
//!
//! ```text
//!   Idle ──submit──▶ Computed ──edit / clear / navigate away──▶ Idle
//! ```
//!
//! With `LockPolicy::LockUntilCleared` a computed session rejects edits
//! until it is cleared explicitly or by navigation. With
//! `LockPolicy::Editable` an edit is accepted and discards the assessment.
//! Either way an assessment never outlives the vitals it was computed from.

use cardio_types::assessment::RiskAssessment;
use cardio_types::errors::{EngineError, SessionError};
use cardio_types::ids::SessionId;
use cardio_types::vitals::{PatientVitals, VitalChange};
use serde::{Deserialize, Serialize};

use crate::engine::{RiskEngine, RiskEngineConfig};
use crate::events::{self, ClearReason, SessionEvent};
use crate::validator;

/// Top-level views of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    /// Input form and result panel
    #[default]
    Diagnostic,
    /// Feature importance and model metrics
    Analytics,
    /// Static model and project description
    About,
}

/// Whether inputs stay editable while an assessment is held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockPolicy {
    /// Inputs are read-only until the assessment is cleared
    #[default]
    LockUntilCleared,
    /// Edits are accepted and silently discard the assessment
    Editable,
}

/// What leaving the diagnostic view does to a held assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationPolicy {
    /// Discard the assessment and release the input lock
    #[default]
    Reset,
    /// Keep the assessment across views
    Preserve,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    Computed,
}

/// Result of a submit action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// A new assessment was computed and stored
    Computed,
    /// An assessment for the same vitals is already held; nothing changed
    Ignored,
}

/// Serializable view of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub state: SessionState,
    pub locked: bool,
    pub view: View,
    pub vitals: PatientVitals,
    pub assessment: Option<RiskAssessment>,
}

/// One user's isolated session context
#[derive(Debug, Clone)]
pub struct SessionContext {
    session_id: SessionId,
    vitals: PatientVitals,
    assessment: Option<RiskAssessment>,
    locked: bool,
    view: View,
    lock_policy: LockPolicy,
    navigation_policy: NavigationPolicy,
}

impl SessionContext {
    /// Fresh session: default vitals, diagnostic view, no assessment
    pub fn new(session_id: SessionId, config: &RiskEngineConfig) -> Self {
        Self {
            session_id,
            vitals: PatientVitals::default(),
            assessment: None,
            locked: false,
            view: View::default(),
            lock_policy: config.lock_policy,
            navigation_policy: config.navigation_policy,
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn vitals(&self) -> &PatientVitals {
        &self.vitals
    }

    pub fn assessment(&self) -> Option<&RiskAssessment> {
        self.assessment.as_ref()
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn state(&self) -> SessionState {
        if self.assessment.is_some() {
            SessionState::Computed
        } else {
            SessionState::Idle
        }
    }

    /// Apply one vital edit.
    ///
    /// An edit that leaves the value unchanged is not a change and keeps
    /// any held assessment.
    pub fn edit(
        &mut self,
        change: VitalChange,
        timestamp: i64,
    ) -> Result<Vec<SessionEvent>, EngineError> {
        if self.locked {
            return Err(SessionError::InputsLocked.into());
        }
        validator::validate_change(&change)?;

        let field = change.field();
        if !self.vitals.apply(change) {
            return Ok(Vec::new());
        }

        let mut session_events = vec![events::vital_updated_event(self.session_id, field, timestamp)];
        if self.assessment.take().is_some() {
            session_events.push(events::assessment_cleared_event(
                self.session_id,
                ClearReason::VitalEdited(field),
                timestamp,
            ));
        }
        Ok(session_events)
    }

    /// Compute an assessment from the current vitals.
    ///
    /// Ignored when an assessment for these vitals is already held.
    pub fn submit(
        &mut self,
        engine: &RiskEngine,
        timestamp: i64,
    ) -> Result<(SubmitOutcome, Vec<SessionEvent>), EngineError> {
        if let Some(held) = &self.assessment {
            if held.matches(&self.vitals) {
                return Ok((
                    SubmitOutcome::Ignored,
                    vec![events::submit_ignored_event(self.session_id, timestamp)],
                ));
            }
        }

        let assessment = engine.compute(&self.vitals)?;
        let event = events::assessment_computed_event(
            self.session_id,
            assessment.risk_probability,
            assessment.band,
            timestamp,
        );
        self.assessment = Some(assessment);
        self.locked = self.lock_policy == LockPolicy::LockUntilCleared;

        Ok((SubmitOutcome::Computed, vec![event]))
    }

    /// Discard any held assessment and release the input lock.
    pub fn clear(&mut self, timestamp: i64) -> Vec<SessionEvent> {
        self.release(ClearReason::Manual, timestamp)
    }

    /// Switch the active view.
    pub fn navigate(&mut self, view: View, timestamp: i64) -> Vec<SessionEvent> {
        if view == self.view {
            return Vec::new();
        }

        let from = self.view;
        self.view = view;
        let mut session_events = vec![events::view_changed_event(self.session_id, from, view, timestamp)];

        if from == View::Diagnostic && self.navigation_policy == NavigationPolicy::Reset {
            session_events.extend(self.release(ClearReason::Navigation, timestamp));
        }
        session_events
    }

    /// Tear the session down; nothing about it is retained.
    pub fn end(mut self, timestamp: i64) -> Vec<SessionEvent> {
        self.release(ClearReason::SessionEnded, timestamp)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.session_id,
            state: self.state(),
            locked: self.locked,
            view: self.view,
            vitals: self.vitals,
            assessment: self.assessment.clone(),
        }
    }

    fn release(&mut self, reason: ClearReason, timestamp: i64) -> Vec<SessionEvent> {
        self.locked = false;
        match self.assessment.take() {
            Some(_) => vec![events::assessment_cleared_event(self.session_id, reason, timestamp)],
            None => Vec::new(),
        }
    }
}
