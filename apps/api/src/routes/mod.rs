pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::Request,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info_span;
use uuid::Uuid;

use crate::analysis::handlers::handle_analyze_resume;
use crate::extraction::handlers::handle_extract_text;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/extract-text", post(handle_extract_text))
        .route("/analyze-resume", post(handle_analyze_resume))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                info_span!(
                    "request",
                    id = %Uuid::new_v4(),
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        // Development posture: every origin, method and header is allowed.
        .layer(CorsLayer::permissive())
        .with_state(state)
}
