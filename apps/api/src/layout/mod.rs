// Label layout: geometry, font metrics, draw primitives and the top-to-bottom
// layout pass. Everything here is pure; rendering lives in `crate::render`.

pub mod branding;
pub mod engine;
pub mod font_metrics;
pub mod geometry;
pub mod primitives;

// Re-export the public API consumed by the renderer and the handlers.
pub use branding::Branding;
pub use engine::{layout_label, LabelLayout};
pub use font_metrics::{get_metrics, LabelFont};
pub use geometry::PageGeometry;
pub use primitives::{DrawOp, RectStyle, Rgb, TextAlign};
