use crate::error::AppError;
use crate::extract::{ApiJson, SessionPath};
use crate::handlers::{log_events, now_nanos};
use crate::models::{SessionResponse, SubmitResponse, ViewRequest};
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use cardio_types::ids::SessionId;
use cardio_types::vitals::VitalChange;

pub async fn create_session(State(state): State<AppState>) -> (StatusCode, Json<SessionResponse>) {
    let ctx = state.engine.new_session(SessionId::new());
    let session = ctx.snapshot();
    state.sessions.insert(ctx);

    tracing::info!(
        session_id = %session.session_id,
        active_sessions = state.sessions.len(),
        "Session started"
    );

    (
        StatusCode::CREATED,
        Json(SessionResponse {
            session,
            events: Vec::new(),
        }),
    )
}

pub async fn get_session(
    State(state): State<AppState>,
    SessionPath(session_id): SessionPath,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state.sessions.with_session(session_id, |ctx| Ok(ctx.snapshot()))?;
    Ok(Json(SessionResponse {
        session,
        events: Vec::new(),
    }))
}

pub async fn edit_vitals(
    State(state): State<AppState>,
    SessionPath(session_id): SessionPath,
    ApiJson(change): ApiJson<VitalChange>,
) -> Result<Json<SessionResponse>, AppError> {
    let timestamp = now_nanos();
    let (session, events) = state
        .sessions
        .with_session(session_id, |ctx| {
            let events = ctx.edit(change, timestamp)?;
            Ok((ctx.snapshot(), events))
        })
        .inspect_err(|e| {
            tracing::warn!(%session_id, field = %change.field(), error = %e, "Edit rejected");
        })?;

    log_events(&events);
    Ok(Json(SessionResponse { session, events }))
}

pub async fn submit(
    State(state): State<AppState>,
    SessionPath(session_id): SessionPath,
) -> Result<Json<SubmitResponse>, AppError> {
    let timestamp = now_nanos();
    let engine = state.engine.clone();
    let (outcome, session, events) = state.sessions.with_session(session_id, |ctx| {
        let (outcome, events) = ctx.submit(&engine, timestamp)?;
        Ok((outcome, ctx.snapshot(), events))
    })?;

    log_events(&events);
    Ok(Json(SubmitResponse {
        outcome,
        session,
        events,
    }))
}

pub async fn clear(
    State(state): State<AppState>,
    SessionPath(session_id): SessionPath,
) -> Result<Json<SessionResponse>, AppError> {
    let timestamp = now_nanos();
    let (session, events) = state.sessions.with_session(session_id, |ctx| {
        let events = ctx.clear(timestamp);
        Ok((ctx.snapshot(), events))
    })?;

    log_events(&events);
    Ok(Json(SessionResponse { session, events }))
}

pub async fn set_view(
    State(state): State<AppState>,
    SessionPath(session_id): SessionPath,
    ApiJson(payload): ApiJson<ViewRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let timestamp = now_nanos();
    let (session, events) = state.sessions.with_session(session_id, |ctx| {
        let events = ctx.navigate(payload.view, timestamp);
        Ok((ctx.snapshot(), events))
    })?;

    log_events(&events);
    Ok(Json(SessionResponse { session, events }))
}

pub async fn end_session(
    State(state): State<AppState>,
    SessionPath(session_id): SessionPath,
) -> Result<StatusCode, AppError> {
    let ctx = state.sessions.remove(session_id)?;
    log_events(&ctx.end(now_nanos()));

    tracing::info!(%session_id, active_sessions = state.sessions.len(), "Session ended");
    Ok(StatusCode::NO_CONTENT)
}
