//! Label Layout Engine — turns a `ShipmentLabel` into absolute-positioned draw ops.
//!
//! # Layout model
//! - One `LayoutCursor` starts at the top margin and moves strictly downward.
//! - Every step draws its primitives relative to the cursor, then advances it by a
//!   fixed, pre-declared height. No measuring, no reflow, no overlap detection.
//! - The right address column gets its own cursor, rewound from the main cursor by
//!   the left column's consumed height so both headers share a row.
//! - The footer is anchored to the bottom margin, not to the cursor.
//!
//! Text is never wrapped. Address lines carry `max_width` as a hint only, so long
//! values can overflow their column.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::layout::branding::Branding;
use crate::layout::font_metrics::LabelFont;
use crate::layout::geometry::{LayoutCursor, PageGeometry};
use crate::layout::primitives::{service_color, DrawOp, RectStyle, Rgb, TextAlign};
use crate::models::ShipmentLabel;

// ────────────────────────────────────────────────────────────────────────────
// Layout constants (mm unless noted)
// ────────────────────────────────────────────────────────────────────────────

const OUTER_BORDER_INSET: f32 = 5.0;
const OUTER_BORDER_WIDTH: f32 = 0.8;
const INNER_BORDER_INSET: f32 = 3.0;
const INNER_BORDER_WIDTH: f32 = 0.2;

const HEADER_HEIGHT: f32 = 25.0;
const HEADER_TEXT_PAD: f32 = 5.0;
const HEADER_BASELINE: f32 = 16.0;
const HEADER_ADVANCE: f32 = 35.0;

const TRACKING_HEIGHT: f32 = 18.0;
const TRACKING_BASELINE: f32 = 12.0;
const TRACKING_ADVANCE: f32 = 26.0;

const BADGE_WIDTH: f32 = 40.0;
const BADGE_HEIGHT: f32 = 10.0;
const BADGE_TEXT_PAD: f32 = 4.0;
const BADGE_BASELINE: f32 = 7.0;
const BADGE_ADVANCE: f32 = 18.0;

const DIVIDER_WIDTH: f32 = 0.3;
const DIVIDER_ADVANCE: f32 = 8.0;

const ADDRESS_HEADING_ADVANCE: f32 = 7.0;
const ADDRESS_NAME_ADVANCE: f32 = 6.0;
const ADDRESS_LINE_ADVANCE: f32 = 5.0;
const ADDRESS_BLOCK_GAP: f32 = 5.0;

const CELL_COUNT: usize = 3;
const CELL_HEIGHT: f32 = 18.0;
const CELL_TEXT_PAD: f32 = 4.0;
const CELL_LABEL_BASELINE: f32 = 6.0;
const CELL_VALUE_BASELINE: f32 = 13.0;
const CELL_ADVANCE: f32 = 26.0;

const NOTICE_LINE_ADVANCE: f32 = 5.0;

const FOOTER_OFFSET: f32 = 20.0;
const FOOTER_LINE1: f32 = 6.0;
const FOOTER_LINE2: f32 = 11.0;

const NOTICES: [&str; 3] = [
    "- Handle with care. Contents may be fragile.",
    "- Keep dry and away from direct heat.",
    "- Report visible damage to the carrier within 48 hours of delivery.",
];

/// Extension of the document the label is emitted as.
pub const OUTPUT_EXTENSION: &str = "pdf";

// ────────────────────────────────────────────────────────────────────────────
// Output
// ────────────────────────────────────────────────────────────────────────────

/// A fully laid-out, one-page label ready for a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelLayout {
    pub page: PageGeometry,
    /// `shipping-label-<trackingNumber>.pdf`
    pub filename: String,
    pub ops: Vec<DrawOp>,
}

#[cfg(test)]
impl LabelLayout {
    /// Finds the first text op whose content equals `text`.
    pub fn find_text(&self, text: &str) -> Option<&DrawOp> {
        self.ops.iter().find(|op| op.text() == Some(text))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Public entry point
// ────────────────────────────────────────────────────────────────────────────

/// Lays out one shipping label. Pure: the same inputs always yield the same ops.
///
/// `rendered_at` is printed in the footer; it is a parameter so callers control
/// the only time-dependent text on the page.
pub fn layout_label(
    label: &ShipmentLabel,
    page: &PageGeometry,
    branding: &Branding,
    rendered_at: DateTime<Utc>,
) -> LabelLayout {
    let mut canvas = Canvas::default();
    let mut cursor = LayoutCursor::new(page);

    draw_borders(&mut canvas, page);
    draw_header(&mut canvas, &mut cursor, page, branding);
    draw_tracking_block(&mut canvas, &mut cursor, page, label);
    draw_service_badge(&mut canvas, &mut cursor, page, label);
    draw_divider(&mut canvas, &mut cursor, page);
    draw_address_block(&mut canvas, &mut cursor, page, label);
    draw_divider(&mut canvas, &mut cursor, page);
    draw_details_grid(&mut canvas, &mut cursor, page, label);
    draw_divider(&mut canvas, &mut cursor, page);
    draw_notices(&mut canvas, &mut cursor, page);
    draw_footer(&mut canvas, page, branding, rendered_at);

    LabelLayout {
        page: *page,
        filename: label.filename(OUTPUT_EXTENSION),
        ops: canvas.ops,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Op builder
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Canvas {
    ops: Vec<DrawOp>,
}

/// Font, size and color of a text run.
#[derive(Clone, Copy)]
struct TextStyle {
    font: LabelFont,
    size_pt: f32,
    color: Rgb,
}

impl TextStyle {
    const fn new(font: LabelFont, size_pt: f32, color: Rgb) -> Self {
        TextStyle {
            font,
            size_pt,
            color,
        }
    }
}

impl Canvas {
    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb, line_width: f32) {
        self.ops.push(DrawOp::Rect {
            x,
            y,
            width,
            height,
            style: RectStyle::Stroke { color, line_width },
        });
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb) {
        self.ops.push(DrawOp::Rect {
            x,
            y,
            width,
            height,
            style: RectStyle::Fill { color },
        });
    }

    fn hline(&mut self, x1: f32, x2: f32, y: f32, color: Rgb, line_width: f32) {
        self.ops.push(DrawOp::Line {
            x1,
            y1: y,
            x2,
            y2: y,
            color,
            line_width,
        });
    }

    fn text(&mut self, text: impl Into<String>, x: f32, y: f32, style: TextStyle, align: TextAlign) {
        self.push_text(text.into(), x, y, style, align, None);
    }

    fn bounded_text(&mut self, text: impl Into<String>, x: f32, y: f32, style: TextStyle, max_width: f32) {
        self.push_text(text.into(), x, y, style, TextAlign::Left, Some(max_width));
    }

    fn push_text(
        &mut self,
        text: String,
        x: f32,
        y: f32,
        style: TextStyle,
        align: TextAlign,
        max_width: Option<f32>,
    ) {
        self.ops.push(DrawOp::Text {
            x,
            y,
            text,
            font: style.font,
            size_pt: style.size_pt,
            color: style.color,
            align,
            max_width,
        });
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Layout steps (top to bottom)
// ────────────────────────────────────────────────────────────────────────────

fn draw_borders(canvas: &mut Canvas, page: &PageGeometry) {
    let m = page.margin_mm;
    canvas.stroke_rect(
        m - OUTER_BORDER_INSET,
        m - OUTER_BORDER_INSET,
        page.content_width() + 2.0 * OUTER_BORDER_INSET,
        page.content_height() + 2.0 * OUTER_BORDER_INSET,
        Rgb::BLACK,
        OUTER_BORDER_WIDTH,
    );
    canvas.stroke_rect(
        m - INNER_BORDER_INSET,
        m - INNER_BORDER_INSET,
        page.content_width() + 2.0 * INNER_BORDER_INSET,
        page.content_height() + 2.0 * INNER_BORDER_INSET,
        Rgb::RULE_GRAY,
        INNER_BORDER_WIDTH,
    );
}

fn draw_header(
    canvas: &mut Canvas,
    cursor: &mut LayoutCursor,
    page: &PageGeometry,
    branding: &Branding,
) {
    let y = cursor.y();
    canvas.fill_rect(page.margin_mm, y, page.content_width(), HEADER_HEIGHT, Rgb::BRAND_BLUE);
    canvas.text(
        branding.brand_name.as_str(),
        page.margin_mm + HEADER_TEXT_PAD,
        y + HEADER_BASELINE,
        TextStyle::new(LabelFont::HelveticaBold, 22.0, Rgb::WHITE),
        TextAlign::Left,
    );
    canvas.text(
        branding.subtitle.as_str(),
        page.right_edge() - HEADER_TEXT_PAD,
        y + HEADER_BASELINE,
        TextStyle::new(LabelFont::Helvetica, 11.0, Rgb::WHITE),
        TextAlign::Right,
    );
    cursor.advance(HEADER_ADVANCE);
}

fn draw_tracking_block(
    canvas: &mut Canvas,
    cursor: &mut LayoutCursor,
    page: &PageGeometry,
    label: &ShipmentLabel,
) {
    let y = cursor.y();
    canvas.stroke_rect(page.margin_mm, y, page.content_width(), TRACKING_HEIGHT, Rgb::BLACK, 0.5);
    canvas.text(
        format!("TRACKING #: {}", label.tracking_number),
        page.margin_mm + HEADER_TEXT_PAD,
        y + TRACKING_BASELINE,
        TextStyle::new(LabelFont::CourierBold, 16.0, Rgb::BLACK),
        TextAlign::Left,
    );
    cursor.advance(TRACKING_ADVANCE);
}

/// Fixed-width badge; the service text is not measured against it.
fn draw_service_badge(
    canvas: &mut Canvas,
    cursor: &mut LayoutCursor,
    page: &PageGeometry,
    label: &ShipmentLabel,
) {
    let y = cursor.y();
    canvas.fill_rect(
        page.margin_mm,
        y,
        BADGE_WIDTH,
        BADGE_HEIGHT,
        service_color(&label.service_type),
    );
    canvas.text(
        label.service_type.badge_text(),
        page.margin_mm + BADGE_TEXT_PAD,
        y + BADGE_BASELINE,
        TextStyle::new(LabelFont::HelveticaBold, 10.0, Rgb::WHITE),
        TextAlign::Left,
    );
    canvas.text(
        format!("Created: {}", label.created_date),
        page.right_edge(),
        y + BADGE_BASELINE,
        TextStyle::new(LabelFont::Helvetica, 10.0, Rgb::BODY_GRAY),
        TextAlign::Right,
    );
    cursor.advance(BADGE_ADVANCE);
}

fn draw_divider(canvas: &mut Canvas, cursor: &mut LayoutCursor, page: &PageGeometry) {
    canvas.hline(
        page.margin_mm,
        page.right_edge(),
        cursor.y(),
        Rgb::RULE_GRAY,
        DIVIDER_WIDTH,
    );
    cursor.advance(DIVIDER_ADVANCE);
}

/// Lines printed under an address heading, top to bottom.
struct AddressLines {
    name: String,
    street: String,
    locality: String,
    phone: String,
}

fn draw_address_block(
    canvas: &mut Canvas,
    cursor: &mut LayoutCursor,
    page: &PageGeometry,
    label: &ShipmentLabel,
) {
    let column_width = page.content_width() / 2.0;

    let from = AddressLines {
        name: label.sender_name.clone(),
        street: label.sender_address.clone(),
        locality: label.sender_locality(),
        phone: format!("Phone: {}", label.sender_phone),
    };
    let consumed = draw_address_column(canvas, cursor, page.margin_mm, column_width, "SHIP FROM", &from);

    // Rewind from where the left column ended so SHIP TO starts on SHIP FROM's row.
    let mut right = LayoutCursor::at(cursor.y() - consumed);
    let to = AddressLines {
        name: label.receiver_name.clone(),
        street: label.receiver_address.clone(),
        locality: label.receiver_locality(),
        phone: format!("Phone: {}", label.receiver_phone),
    };
    draw_address_column(
        canvas,
        &mut right,
        page.margin_mm + column_width,
        column_width,
        "SHIP TO",
        &to,
    );

    cursor.advance(ADDRESS_BLOCK_GAP);
}

/// Draws one address column at the cursor and returns the height it consumed.
fn draw_address_column(
    canvas: &mut Canvas,
    cursor: &mut LayoutCursor,
    x: f32,
    max_width: f32,
    heading: &str,
    lines: &AddressLines,
) -> f32 {
    let start = cursor.y();
    let body = TextStyle::new(LabelFont::Helvetica, 10.0, Rgb::BLACK);

    canvas.bounded_text(
        heading,
        x,
        cursor.y(),
        TextStyle::new(LabelFont::HelveticaBold, 10.0, Rgb::MUTED_GRAY),
        max_width,
    );
    cursor.advance(ADDRESS_HEADING_ADVANCE);

    canvas.bounded_text(
        lines.name.as_str(),
        x,
        cursor.y(),
        TextStyle::new(LabelFont::HelveticaBold, 12.0, Rgb::BLACK),
        max_width,
    );
    cursor.advance(ADDRESS_NAME_ADVANCE);

    for line in [&lines.street, &lines.locality, &lines.phone] {
        canvas.bounded_text(line.as_str(), x, cursor.y(), body, max_width);
        cursor.advance(ADDRESS_LINE_ADVANCE);
    }

    cursor.y() - start
}

fn draw_details_grid(
    canvas: &mut Canvas,
    cursor: &mut LayoutCursor,
    page: &PageGeometry,
    label: &ShipmentLabel,
) {
    let y = cursor.y();
    let cell_width = page.content_width() / CELL_COUNT as f32;
    let cells: [(&str, String); CELL_COUNT] = [
        ("WEIGHT", label.weight_text()),
        ("SERVICE TYPE", label.service_type.display_name()),
        ("EST. DELIVERY", label.estimated_delivery.clone()),
    ];

    for (i, (caption, value)) in cells.into_iter().enumerate() {
        let x = page.margin_mm + i as f32 * cell_width;
        canvas.stroke_rect(x, y, cell_width, CELL_HEIGHT, Rgb::RULE_GRAY, DIVIDER_WIDTH);
        canvas.text(
            caption,
            x + CELL_TEXT_PAD,
            y + CELL_LABEL_BASELINE,
            TextStyle::new(LabelFont::Helvetica, 8.0, Rgb::MUTED_GRAY),
            TextAlign::Left,
        );
        canvas.text(
            value,
            x + CELL_TEXT_PAD,
            y + CELL_VALUE_BASELINE,
            TextStyle::new(LabelFont::HelveticaBold, 12.0, Rgb::BLACK),
            TextAlign::Left,
        );
    }
    cursor.advance(CELL_ADVANCE);
}

fn draw_notices(canvas: &mut Canvas, cursor: &mut LayoutCursor, page: &PageGeometry) {
    canvas.text(
        "IMPORTANT NOTICES",
        page.margin_mm,
        cursor.y(),
        TextStyle::new(LabelFont::HelveticaBold, 10.0, Rgb::WARNING_RED),
        TextAlign::Left,
    );
    cursor.advance(NOTICE_LINE_ADVANCE + 1.0);

    let style = TextStyle::new(LabelFont::Helvetica, 9.0, Rgb::WARNING_RED);
    for notice in NOTICES {
        canvas.text(notice, page.margin_mm, cursor.y(), style, TextAlign::Left);
        cursor.advance(NOTICE_LINE_ADVANCE);
    }
}

/// Anchored to the bottom margin; ignores the running cursor.
fn draw_footer(
    canvas: &mut Canvas,
    page: &PageGeometry,
    branding: &Branding,
    rendered_at: DateTime<Utc>,
) {
    let footer_y = page.bottom_edge() - FOOTER_OFFSET;
    let style = TextStyle::new(LabelFont::Helvetica, 8.0, Rgb::MUTED_GRAY);

    canvas.hline(page.margin_mm, page.right_edge(), footer_y, Rgb::RULE_GRAY, DIVIDER_WIDTH);

    canvas.text(
        format!("{} - {}", branding.brand_name, branding.tagline),
        page.margin_mm,
        footer_y + FOOTER_LINE1,
        style,
        TextAlign::Left,
    );
    canvas.text(
        format!("Generated: {}", rendered_at.format("%Y-%m-%d %H:%M UTC")),
        page.right_edge(),
        footer_y + FOOTER_LINE1,
        style,
        TextAlign::Right,
    );
    canvas.text(
        branding.contact.as_str(),
        page.margin_mm,
        footer_y + FOOTER_LINE2,
        style,
        TextAlign::Left,
    );
    canvas.text(
        branding.website.as_str(),
        page.right_edge(),
        footer_y + FOOTER_LINE2,
        style,
        TextAlign::Right,
    );
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
