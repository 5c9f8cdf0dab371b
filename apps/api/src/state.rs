use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::config::Config;
use crate::layout::{Branding, PageGeometry};
use crate::render::LabelRenderer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable output backend. Default: PdfLabelRenderer.
    pub renderer: Arc<dyn LabelRenderer>,
    /// Page every label is laid out on (A4 portrait, 15mm margin).
    pub page: PageGeometry,
    in_flight: Arc<AtomicUsize>,
}

impl AppState {
    pub fn new(config: Config, renderer: Arc<dyn LabelRenderer>) -> Self {
        AppState {
            config,
            renderer,
            page: PageGeometry::a4_portrait(),
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn branding(&self) -> &Branding {
        &self.config.branding
    }

    /// Number of renders currently between start and completion.
    pub fn in_flight_renders(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Marks a render as started. The count drops again when the guard is
    /// dropped, whether the render succeeded, failed or panicked.
    pub fn begin_render(&self) -> RenderGuard {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        RenderGuard {
            in_flight: Arc::clone(&self.in_flight),
        }
    }
}

/// Held for the lifetime of one render.
pub struct RenderGuard {
    in_flight: Arc<AtomicUsize>,
}

impl Drop for RenderGuard {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}
