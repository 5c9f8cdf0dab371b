//! PDF backend built on printpdf's op list API.
//!
//! Layout coordinates are top-left-origin millimeters; PDF space is bottom-left.
//! Every y is flipped against the page height here and nowhere else.
//!
//! Builtin fonts carry `/WinAnsiEncoding`, so text runs are written as raw
//! WinAnsi bytes through a `Tj` op rather than printpdf's text items.

use bytes::Bytes;
use printpdf::{
    BuiltinFont, Color, DictItem, Line, LinePoint, Mm, Op, PaintMode, PdfDocument, PdfPage,
    PdfSaveOptions, Point, Polygon, PolygonRing, Pt, WindingOrder,
};
use tracing::debug;

use crate::errors::AppError;
use crate::layout::font_metrics::{encode_win_ansi, MM_PER_PT};
use crate::layout::{get_metrics, DrawOp, LabelFont, LabelLayout, PageGeometry, RectStyle, Rgb, TextAlign};
use crate::render::{LabelRenderer, RenderedLabel};

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Emits each label as a single-page PDF sized to the layout's page geometry.
#[derive(Debug, Clone, Default)]
pub struct PdfLabelRenderer;

impl LabelRenderer for PdfLabelRenderer {
    fn render(&self, layout: &LabelLayout) -> Result<RenderedLabel, AppError> {
        validate_layout(layout)?;

        let page = &layout.page;
        let mut ops = Vec::with_capacity(layout.ops.len() * 4);
        for op in &layout.ops {
            ops.extend(translate_op(op, page));
        }

        let title = layout.filename.trim_end_matches(".pdf");
        let mut doc = PdfDocument::new(title);
        let pdf_page = PdfPage::new(Mm(page.width_mm), Mm(page.height_mm), ops);

        // The only raw operator emitted is `Tj` for WinAnsi text.
        let options = PdfSaveOptions {
            secure: false,
            ..PdfSaveOptions::default()
        };
        let mut warnings = Vec::new();
        let bytes = doc
            .with_pages(vec![pdf_page])
            .save(&options, &mut warnings);

        debug!(
            filename = %layout.filename,
            bytes = bytes.len(),
            warnings = warnings.len(),
            "PDF serialized"
        );

        Ok(RenderedLabel {
            filename: layout.filename.clone(),
            content_type: PDF_CONTENT_TYPE,
            bytes: Bytes::from(bytes),
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Validation
// ────────────────────────────────────────────────────────────────────────────

/// Rejects layouts the PDF writer cannot represent: non-finite numbers anywhere,
/// or a page without a positive size.
fn validate_layout(layout: &LabelLayout) -> Result<(), AppError> {
    let page = &layout.page;
    let page_values = [page.width_mm, page.height_mm, page.margin_mm];
    if page_values.iter().any(|v| !v.is_finite()) || page.width_mm <= 0.0 || page.height_mm <= 0.0 {
        return Err(AppError::Render(format!("invalid page geometry: {page:?}")));
    }

    for (index, op) in layout.ops.iter().enumerate() {
        if op.coordinates().iter().any(|v| !v.is_finite()) {
            return Err(AppError::Render(format!(
                "non-finite coordinate in draw op {index}: {op:?}"
            )));
        }
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Op translation
// ────────────────────────────────────────────────────────────────────────────

fn translate_op(op: &DrawOp, page: &PageGeometry) -> Vec<Op> {
    match op {
        DrawOp::Rect {
            x,
            y,
            width,
            height,
            style,
        } => {
            let ring = PolygonRing {
                points: vec![
                    line_point(*x, *y, page),
                    line_point(x + width, *y, page),
                    line_point(x + width, y + height, page),
                    line_point(*x, y + height, page),
                ],
            };
            let (setup, mode) = match style {
                RectStyle::Stroke { color, line_width } => (
                    vec![
                        Op::SetOutlineColor { col: pdf_color(*color) },
                        Op::SetOutlineThickness { pt: mm_to_pt(*line_width) },
                    ],
                    PaintMode::Stroke,
                ),
                RectStyle::Fill { color } => {
                    (vec![Op::SetFillColor { col: pdf_color(*color) }], PaintMode::Fill)
                }
            };
            let mut ops = setup;
            ops.push(Op::DrawPolygon {
                polygon: Polygon {
                    rings: vec![ring],
                    mode,
                    winding_order: WindingOrder::NonZero,
                },
            });
            ops
        }
        DrawOp::Line {
            x1,
            y1,
            x2,
            y2,
            color,
            line_width,
        } => vec![
            Op::SetOutlineColor { col: pdf_color(*color) },
            Op::SetOutlineThickness { pt: mm_to_pt(*line_width) },
            Op::DrawLine {
                line: Line {
                    points: vec![line_point(*x1, *y1, page), line_point(*x2, *y2, page)],
                    is_closed: false,
                },
            },
        ],
        DrawOp::Text {
            x,
            y,
            text,
            font,
            size_pt,
            color,
            align,
            ..
        } => {
            let anchor_x = match align {
                TextAlign::Left => *x,
                TextAlign::Right => x - get_metrics(*font).measure_mm(text, *size_pt),
            };
            let builtin = builtin_font(*font);
            vec![
                Op::StartTextSection,
                Op::SetFillColor { col: pdf_color(*color) },
                Op::SetFontSizeBuiltinFont {
                    size: Pt(*size_pt),
                    font: builtin,
                },
                Op::SetTextCursor {
                    pos: Point::new(Mm(anchor_x), Mm(page.height_mm - y)),
                },
                // Empty run: registers the font resource for the page, writes nothing.
                Op::WriteTextBuiltinFont {
                    items: Vec::new(),
                    font: builtin,
                },
                Op::Unknown {
                    key: "Tj".to_string(),
                    value: vec![DictItem::String {
                        data: encode_win_ansi(text),
                        literal: false,
                    }],
                },
                Op::EndTextSection,
            ]
        }
    }
}

fn line_point(x: f32, y: f32, page: &PageGeometry) -> LinePoint {
    LinePoint {
        p: Point::new(Mm(x), Mm(page.height_mm - y)),
        bezier: false,
    }
}

fn mm_to_pt(mm: f32) -> Pt {
    Pt(mm / MM_PER_PT)
}

fn pdf_color(color: Rgb) -> Color {
    Color::Rgb(printpdf::Rgb {
        r: f32::from(color.0) / 255.0,
        g: f32::from(color.1) / 255.0,
        b: f32::from(color.2) / 255.0,
        icc_profile: None,
    })
}

fn builtin_font(font: LabelFont) -> BuiltinFont {
    match font {
        LabelFont::Helvetica => BuiltinFont::Helvetica,
        LabelFont::HelveticaBold => BuiltinFont::HelveticaBold,
        LabelFont::Courier => BuiltinFont::Courier,
        LabelFont::CourierBold => BuiltinFont::CourierBold,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::layout::{layout_label, Branding};
    use crate::models::{ServiceType, ShipmentLabel};

    fn sample_layout(label: &ShipmentLabel) -> LabelLayout {
        layout_label(
            label,
            &PageGeometry::a4_portrait(),
            &Branding::default(),
            Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap(),
        )
    }

    #[test]
    fn test_renders_single_pdf_named_after_tracking_number() {
        let rendered = PdfLabelRenderer
            .render(&sample_layout(&ShipmentLabel::sample()))
            .unwrap();
        assert_eq!(rendered.filename, "shipping-label-RPHX123456789.pdf");
        assert_eq!(rendered.content_type, "application/pdf");
        assert!(rendered.bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_rendered_pdf_contains_tracking_number() {
        let rendered = PdfLabelRenderer
            .render(&sample_layout(&ShipmentLabel::sample()))
            .unwrap();
        let text = pdf_extract::extract_text_from_mem(&rendered.bytes).unwrap();
        assert!(
            text.contains("RPHX123456789"),
            "extracted text should contain the tracking number: {text}"
        );
    }

    #[test]
    fn test_sample_pdf_is_one_page_with_label_text() {
        let rendered = PdfLabelRenderer
            .render(&sample_layout(&ShipmentLabel::sample()))
            .unwrap();

        let doc = pdf_extract::Document::load_mem(&rendered.bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
        let page_objects = doc
            .objects
            .values()
            .filter(|obj| {
                obj.as_dict()
                    .ok()
                    .and_then(|dict| dict.get(b"Type").ok())
                    .and_then(|ty| ty.as_name().ok())
                    == Some(b"Page".as_slice())
            })
            .count();
        assert_eq!(page_objects, 1);

        let text = pdf_extract::extract_text_from_mem(&rendered.bytes).unwrap();
        for expected in ["SHIP TO", "Express", "100 kg"] {
            assert!(text.contains(expected), "missing {expected:?} in: {text}");
        }
    }

    #[test]
    fn test_non_ascii_city_is_written_as_win_ansi() {
        let label = ShipmentLabel {
            sender_city: "São Paulo".to_string(),
            ..ShipmentLabel::sample()
        };
        let rendered = PdfLabelRenderer.render(&sample_layout(&label)).unwrap();
        let text = pdf_extract::extract_text_from_mem(&rendered.bytes).unwrap();
        assert!(text.contains("São Paulo"), "city should survive encoding: {text}");
    }

    #[test]
    fn test_text_run_is_win_ansi_tj() {
        let page = PageGeometry::a4_portrait();
        let op = DrawOp::Text {
            x: 15.0,
            y: 120.0,
            text: "Zürich 東".to_string(),
            font: LabelFont::Helvetica,
            size_pt: 10.0,
            color: Rgb::BODY_GRAY,
            align: TextAlign::Left,
            max_width: None,
        };
        let ops = translate_op(&op, &page);
        let data = ops
            .iter()
            .find_map(|op| match op {
                Op::Unknown { key, value } if key == "Tj" => match value.as_slice() {
                    [DictItem::String { data, .. }] => Some(data.clone()),
                    _ => None,
                },
                _ => None,
            })
            .expect("Tj op");
        assert_eq!(data, vec![b'Z', 0xFC, b'r', b'i', b'c', b'h', b' ', b'?']);
    }

    #[test]
    fn test_unknown_service_and_long_address_still_render() {
        let label = ShipmentLabel {
            service_type: ServiceType::from("unknown_value".to_string()),
            sender_address: "Long Street ".repeat(17),
            ..ShipmentLabel::sample()
        };
        assert!(label.sender_address.len() >= 200);
        let rendered = PdfLabelRenderer.render(&sample_layout(&label)).unwrap();
        assert!(!rendered.bytes.is_empty());
    }

    #[test]
    fn test_non_finite_coordinate_is_a_render_error() {
        let mut layout = sample_layout(&ShipmentLabel::sample());
        layout.ops.push(DrawOp::Line {
            x1: f32::NAN,
            y1: 0.0,
            x2: 10.0,
            y2: 0.0,
            color: Rgb::BLACK,
            line_width: 0.3,
        });
        let result = PdfLabelRenderer.render(&layout);
        assert!(matches!(result, Err(AppError::Render(_))));
    }

    #[test]
    fn test_invalid_page_geometry_is_a_render_error() {
        let mut layout = sample_layout(&ShipmentLabel::sample());
        layout.page.height_mm = f32::INFINITY;
        assert!(matches!(
            PdfLabelRenderer.render(&layout),
            Err(AppError::Render(_))
        ));
    }

    #[test]
    fn test_text_y_is_flipped_and_right_text_is_shifted_left() {
        let page = PageGeometry::a4_portrait();
        let op = DrawOp::Text {
            x: 195.0,
            y: 268.0,
            text: "Müller & Søn".to_string(),
            font: LabelFont::Helvetica,
            size_pt: 8.0,
            color: Rgb::MUTED_GRAY,
            align: TextAlign::Right,
            max_width: None,
        };
        let ops = translate_op(&op, &page);
        let drawn = encode_win_ansi("Müller & Søn");
        let expected_x =
            195.0 - get_metrics(LabelFont::Helvetica).measure_bytes(&drawn) * 8.0 * MM_PER_PT;
        let expected = Point::new(Mm(expected_x), Mm(297.0 - 268.0));
        let (x, y) = ops
            .iter()
            .find_map(|op| match op {
                Op::SetTextCursor { pos } => Some((pos.x.0, pos.y.0)),
                _ => None,
            })
            .expect("text cursor op");
        assert!((x - expected.x.0).abs() < 1e-4, "x {x} vs {}", expected.x.0);
        assert!((y - expected.y.0).abs() < 1e-4, "y {y} vs {}", expected.y.0);
    }

    #[test]
    fn test_rect_becomes_closed_polygon() {
        let page = PageGeometry::a4_portrait();
        let op = DrawOp::Rect {
            x: 15.0,
            y: 76.0,
            width: 40.0,
            height: 10.0,
            style: RectStyle::Fill {
                color: Rgb::EXPRESS_BLUE,
            },
        };
        let ops = translate_op(&op, &page);
        assert_eq!(ops.len(), 2);
        assert!(matches!(ops[0], Op::SetFillColor { .. }));
        match &ops[1] {
            Op::DrawPolygon { polygon } => {
                assert_eq!(polygon.rings[0].points.len(), 4);
                assert!(matches!(polygon.mode, PaintMode::Fill));
            }
            _ => panic!("expected a polygon op"),
        }
    }
}
