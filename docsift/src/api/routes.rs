use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{documents, health, sessions};
use super::AppState;

const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health::health))
        .route(
            "/api/v1/sessions/{session_id}/documents",
            post(documents::upload_documents).get(documents::list_documents),
        )
        .route(
            "/api/v1/sessions/{session_id}/emails",
            post(documents::ingest_email),
        )
        .route(
            "/api/v1/sessions/{session_id}/ingest",
            post(sessions::ingest_session),
        )
        .route(
            "/api/v1/sessions/{session_id}/process",
            post(sessions::process_session),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(MAX_UPLOAD_BYTES))
        .with_state(state)
}
