//! Rendering — turns a `LabelLayout` into a downloadable document.
//!
//! Default: `PdfLabelRenderer` (printpdf, builtin fonts, one page).
//! `AppState` holds an `Arc<dyn LabelRenderer>`.

pub mod pdf;

use bytes::Bytes;

use crate::errors::AppError;
use crate::layout::LabelLayout;

pub use pdf::PdfLabelRenderer;

/// A finished document plus what a download response needs to serve it.
#[derive(Debug, Clone)]
pub struct RenderedLabel {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Bytes,
}

/// Implement this to emit labels in another format without touching the
/// layout engine or the handlers.
pub trait LabelRenderer: Send + Sync {
    /// Renders the layout. Errors are never swallowed: an `AppError::Render`
    /// means no document was produced.
    fn render(&self, layout: &LabelLayout) -> Result<RenderedLabel, AppError>;
}
