mod error;
mod submit;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::intake_service::SubmissionIntake;

/// Shared state passed to all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub intake: Arc<SubmissionIntake>,
}

/// Builds the router with the intake endpoints.
///
/// `/api/submit` is the path the website's form posts to, `/submissions` is the same handler.
pub fn build_router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/submissions", post(submit::submit))
        .route("/api/submit", post(submit::submit))
        .route("/health", get(submit::health))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}
