//! Drawing primitives emitted by the layout engine.
//!
//! Coordinates are millimeters from the top-left corner of the page. A text op's
//! `y` is its baseline. The renderer is responsible for flipping into PDF space.

use serde::{Deserialize, Serialize};

use crate::layout::font_metrics::LabelFont;
use crate::models::ServiceType;

// ────────────────────────────────────────────────────────────────────────────
// Colors
// ────────────────────────────────────────────────────────────────────────────

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    /// Header band.
    pub const BRAND_BLUE: Rgb = Rgb(37, 99, 235);
    /// Inset border, dividers, cell borders.
    pub const RULE_GRAY: Rgb = Rgb(200, 200, 200);
    /// Column headers, cell labels, footer text.
    pub const MUTED_GRAY: Rgb = Rgb(107, 114, 128);
    pub const BODY_GRAY: Rgb = Rgb(55, 65, 81);
    /// Safety notices.
    pub const WARNING_RED: Rgb = Rgb(220, 38, 38);

    pub const EXPRESS_BLUE: Rgb = Rgb(59, 130, 246);
    pub const STANDARD_ORANGE: Rgb = Rgb(249, 115, 22);
    pub const ECONOMY_GREEN: Rgb = Rgb(34, 197, 94);
}

/// Badge color for a service tier. Anything outside the known tiers gets the
/// standard color.
pub fn service_color(service: &ServiceType) -> Rgb {
    match service {
        ServiceType::Express => Rgb::EXPRESS_BLUE,
        ServiceType::Standard => Rgb::STANDARD_ORANGE,
        ServiceType::Economy => Rgb::ECONOMY_GREEN,
        ServiceType::Other(_) => Rgb::STANDARD_ORANGE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Ops
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RectStyle {
    Stroke { color: Rgb, line_width: f32 },
    Fill { color: Rgb },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    /// Anchored at `x`.
    Left,
    /// Right edge anchored at `x`.
    Right,
}

/// One absolute-positioned drawing call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        style: RectStyle,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: Rgb,
        line_width: f32,
    },
    Text {
        x: f32,
        y: f32,
        text: String,
        font: LabelFont,
        size_pt: f32,
        color: Rgb,
        align: TextAlign,
        /// Bounding hint only. Text is never wrapped or truncated to fit it.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_width: Option<f32>,
    },
}

impl DrawOp {
    /// Every numeric field of the op, in declaration order.
    pub fn coordinates(&self) -> Vec<f32> {
        match self {
            DrawOp::Rect {
                x,
                y,
                width,
                height,
                style,
            } => {
                let mut values = vec![*x, *y, *width, *height];
                if let RectStyle::Stroke { line_width, .. } = style {
                    values.push(*line_width);
                }
                values
            }
            DrawOp::Line {
                x1,
                y1,
                x2,
                y2,
                line_width,
                ..
            } => vec![*x1, *y1, *x2, *y2, *line_width],
            DrawOp::Text {
                x,
                y,
                size_pt,
                max_width,
                ..
            } => {
                let mut values = vec![*x, *y, *size_pt];
                values.extend(max_width);
                values
            }
        }
    }

    /// The text of a text op.
    #[cfg(test)]
    pub fn text(&self) -> Option<&str> {
        match self {
            DrawOp::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}
