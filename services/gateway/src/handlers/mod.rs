pub mod analytics;
pub mod session;

use risk_engine::events::SessionEvent;

/// Event timestamp in nanoseconds since the Unix epoch
pub(crate) fn now_nanos() -> i64 {
    chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
}

pub(crate) fn log_events(events: &[SessionEvent]) {
    for event in events {
        tracing::info!(
            session_id = %event.session_id,
            event_id = %event.event_id,
            event = ?event.event_type,
            "Session transition"
        );
    }
}
