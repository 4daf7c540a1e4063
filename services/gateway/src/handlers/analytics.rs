use crate::models::AboutResponse;
use crate::state::AppState;
use axum::{extract::State, Json};
use risk_engine::analytics::AnalyticsReport;

/// Feature importance and model metrics; placeholders when the model lacks them
pub async fn get_analytics(State(state): State<AppState>) -> Json<AnalyticsReport> {
    Json(state.engine.analytics())
}

pub async fn get_about() -> Json<AboutResponse> {
    Json(AboutResponse::current())
}
