//! Page geometry and the vertical layout cursor.
//!
//! All values are millimeters with a top-left origin; `y` grows downward.

use serde::{Deserialize, Serialize};

/// Physical page size and the constant margin applied on every side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width_mm: f32,
    pub height_mm: f32,
    pub margin_mm: f32,
}

impl PageGeometry {
    /// Portrait A4 (210 × 297 mm) with a 15 mm margin.
    pub const fn a4_portrait() -> Self {
        PageGeometry {
            width_mm: 210.0,
            height_mm: 297.0,
            margin_mm: 15.0,
        }
    }

    /// Usable drawing width: page width minus both margins.
    pub fn content_width(&self) -> f32 {
        self.width_mm - 2.0 * self.margin_mm
    }

    /// Usable drawing height: page height minus both margins.
    pub fn content_height(&self) -> f32 {
        self.height_mm - 2.0 * self.margin_mm
    }

    /// X coordinate of the right margin.
    pub fn right_edge(&self) -> f32 {
        self.width_mm - self.margin_mm
    }

    /// Y coordinate of the bottom margin.
    pub fn bottom_edge(&self) -> f32 {
        self.height_mm - self.margin_mm
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4_portrait()
    }
}

/// Running write position for one layout pass. Each step reads `y`, draws, and
/// advances by its own fixed height. There is no reflow: position is purely a
/// function of emission order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutCursor {
    y: f32,
}

impl LayoutCursor {
    /// Starts at the top margin.
    pub fn new(geometry: &PageGeometry) -> Self {
        LayoutCursor {
            y: geometry.margin_mm,
        }
    }

    pub fn at(y: f32) -> Self {
        LayoutCursor { y }
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn advance(&mut self, height: f32) {
        self.y += height;
    }
}
