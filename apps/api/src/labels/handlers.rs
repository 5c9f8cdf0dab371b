//! Axum route handlers for the Label API.
//!
//! These play the part of the dashboard's "generate label" button: mark a render
//! in flight, run it off the async executor, clear the in-flight mark no matter
//! how the render ends, and hand back either the document or a generic error.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::layout::{layout_label, LabelLayout};
use crate::models::ShipmentLabel;
use crate::render::RenderedLabel;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/labels
///
/// Lays out and renders the label, returning it as a file download named
/// `shipping-label-<trackingNumber>.pdf`.
pub async fn handle_render_label(
    State(state): State<AppState>,
    Json(label): Json<ShipmentLabel>,
) -> Result<Response, AppError> {
    validate_tracking_number(&label.tracking_number)?;
    let rendered = render_label(&state, label).await?;
    download_response(rendered)
}

/// POST /api/v1/labels/layout
///
/// Returns the draw ops the renderer would receive. Nothing is rendered.
pub async fn handle_preview_layout(
    State(state): State<AppState>,
    Json(label): Json<ShipmentLabel>,
) -> Result<Json<LabelLayout>, AppError> {
    validate_tracking_number(&label.tracking_number)?;
    let layout = layout_label(&label, &state.page, state.branding(), Utc::now());
    Ok(Json(layout))
}

/// GET /api/v1/labels/sample
///
/// Renders the built-in demo shipment.
pub async fn handle_sample_label(State(state): State<AppState>) -> Result<Response, AppError> {
    let rendered = render_label(&state, ShipmentLabel::sample()).await?;
    download_response(rendered)
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// The tracking number ends up in a `Content-Disposition` header, so it must be
/// non-blank and free of quotes and control characters.
fn validate_tracking_number(tracking_number: &str) -> Result<(), AppError> {
    if tracking_number.trim().is_empty() {
        return Err(AppError::Validation(
            "trackingNumber cannot be empty".to_string(),
        ));
    }
    if tracking_number.chars().any(|c| c == '"' || c.is_control()) {
        return Err(AppError::Validation(
            "trackingNumber contains characters not allowed in a filename".to_string(),
        ));
    }
    Ok(())
}

/// Runs layout + render on the blocking pool. The in-flight guard moves into the
/// blocking closure so it is released exactly when the work ends.
async fn render_label(state: &AppState, label: ShipmentLabel) -> Result<RenderedLabel, AppError> {
    let guard = state.begin_render();
    let renderer = Arc::clone(&state.renderer);
    let page = state.page;
    let branding = state.branding().clone();
    let tracking_number = label.tracking_number.clone();

    info!(
        tracking_number = %tracking_number,
        service = %label.service_type,
        "Rendering shipping label"
    );

    let result = tokio::task::spawn_blocking(move || {
        let _guard = guard;
        let layout = layout_label(&label, &page, &branding, Utc::now());
        renderer.render(&layout)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in label render: {e}")))?;

    match &result {
        Ok(rendered) => info!(
            tracking_number = %tracking_number,
            filename = %rendered.filename,
            bytes = rendered.bytes.len(),
            "Shipping label rendered"
        ),
        Err(e) => warn!(tracking_number = %tracking_number, "Shipping label render failed: {e}"),
    }
    result
}

fn download_response(rendered: RenderedLabel) -> Result<Response, AppError> {
    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        rendered.filename
    ))
    .map_err(|e| AppError::Internal(anyhow::anyhow!("invalid Content-Disposition: {e}")))?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(rendered.content_type)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        rendered.bytes,
    )
        .into_response())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
