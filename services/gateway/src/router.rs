use crate::handlers::{analytics, session};
use crate::state::AppState;
use axum::{
    routing::{get, patch, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/sessions", post(session::create_session))
        .route(
            "/sessions/{id}",
            get(session::get_session).delete(session::end_session),
        )
        .route("/sessions/{id}/vitals", patch(session::edit_vitals))
        .route("/sessions/{id}/submit", post(session::submit))
        .route("/sessions/{id}/clear", post(session::clear))
        .route("/sessions/{id}/view", put(session::set_view))
        .route("/analytics", get(analytics::get_analytics))
        .route("/about", get(analytics::get_about));

    Router::new()
        .nest("/v1", api_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
