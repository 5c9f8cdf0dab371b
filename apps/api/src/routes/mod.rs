pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::labels::handlers;
use crate::state::AppState;

async fn not_found() -> AppError {
    AppError::NotFound("No such route".to_string())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Label API
        .route("/api/v1/labels", post(handlers::handle_render_label))
        .route("/api/v1/labels/layout", post(handlers::handle_preview_layout))
        .route("/api/v1/labels/sample", get(handlers::handle_sample_label))
        .fallback(not_found)
        .with_state(state)
}
