//! Static font-metric tables for the builtin PDF fonts used on the label.
//!
//! Character widths are in em units (relative to font size), taken from the
//! standard Adobe AFM files for the base-14 fonts. Widths are only used to anchor
//! right-aligned text at its right edge; nothing on the label is wrapped or
//! truncated.
//! All tables cover ASCII 0x20..=0x7E (95 printable characters).
//! Index = (byte as usize) - 32.
//!
//! Builtin fonts are written with WinAnsiEncoding, so text is converted with
//! [`encode_win_ansi`] before it is both measured and drawn.

use serde::{Deserialize, Serialize};

/// Millimeters per typographic point (1pt = 1/72in).
pub const MM_PER_PT: f32 = 25.4 / 72.0;

// ────────────────────────────────────────────────────────────────────────────
// Font enum
// ────────────────────────────────────────────────────────────────────────────

/// The builtin PDF fonts the label draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LabelFont {
    Helvetica,
    HelveticaBold,
    /// Tracking number only.
    Courier,
    CourierBold,
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for a font.
///
/// `widths[i]` = width of ASCII character `(i + 32)`, covering 0x20 (space) through 0x7E (~).
///
/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    widths: [f32; 95],
    /// Fallback width for WinAnsi bytes outside 0x20..=0x7E.
    pub average_char_width: f32,
}

impl FontMetricTable {
    /// Measures the width of a string in em units, one glyph per WinAnsi byte.
    ///
    /// Non-ASCII glyphs fall back to `average_char_width`; characters with no
    /// WinAnsi code are measured as the `?` they are drawn as.
    pub fn measure_str(&self, s: &str) -> f32 {
        self.measure_bytes(&encode_win_ansi(s))
    }

    /// Width of already-encoded WinAnsi bytes in em units.
    pub fn measure_bytes(&self, bytes: &[u8]) -> f32 {
        bytes
            .iter()
            .map(|&b| match b {
                0x20..=0x7E => self.widths[usize::from(b) - 32],
                _ => self.average_char_width,
            })
            .sum()
    }

    /// Width of a string in millimeters at the given point size.
    pub fn measure_mm(&self, s: &str, size_pt: f32) -> f32 {
        self.measure_str(s) * size_pt * MM_PER_PT
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    average_char_width: 0.556,
};

static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.333, 0.474, 0.556, 0.556, 0.889, 0.722, 0.238, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.333, 0.333, 0.584, 0.584, 0.584, 0.611, 0.975,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.722, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.556, 0.722, 0.611, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.584, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.611, 0.556, 0.611, 0.556, 0.333, 0.611, 0.611, 0.278, 0.278, 0.556, 0.278, 0.889,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.611, 0.611, 0.611, 0.611, 0.389, 0.556, 0.333, 0.611, 0.556, 0.778, 0.556, 0.556, 0.500,
        // {      |      }      ~
        0.389, 0.280, 0.389, 0.584,
    ],
    average_char_width: 0.611,
};

/// Courier and Courier-Bold are monospaced: every glyph is 0.6em.
static COURIER_TABLE: FontMetricTable = FontMetricTable {
    widths: [0.600; 95],
    average_char_width: 0.600,
};

static COURIER_BOLD_TABLE: FontMetricTable = FontMetricTable {
    widths: [0.600; 95],
    average_char_width: 0.600,
};

/// Returns the static metric table for a given font.
pub fn get_metrics(font: LabelFont) -> &'static FontMetricTable {
    match font {
        LabelFont::Helvetica => &HELVETICA_TABLE,
        LabelFont::HelveticaBold => &HELVETICA_BOLD_TABLE,
        LabelFont::Courier => &COURIER_TABLE,
        LabelFont::CourierBold => &COURIER_BOLD_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// WinAnsi encoding
// ────────────────────────────────────────────────────────────────────────────

/// Converts text to WinAnsiEncoding (CP1252) bytes for the builtin fonts.
///
/// Characters without a WinAnsi code become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

fn win_ansi_byte(c: char) -> u8 {
    match c {
        ' '..='~' | '\u{A0}'..='\u{FF}' => c as u8,
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => b'?',
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        let metrics = get_metrics(LabelFont::Helvetica);
        assert_eq!(metrics.measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_ascii_characters() {
        let metrics = get_metrics(LabelFont::Helvetica);
        // "Ship" = S(0.667) + h(0.556) + i(0.222) + p(0.556) = 2.001
        let width = metrics.measure_str("Ship");
        assert!(
            (width - 2.001).abs() < 1e-3,
            "Ship width should be ~2.001, got {width}"
        );
    }

    #[test]
    fn test_measure_str_non_ascii_falls_back() {
        let metrics = get_metrics(LabelFont::Helvetica);
        let width = metrics.measure_str("é");
        assert!(
            (width - metrics.average_char_width).abs() < 1e-4,
            "non-ASCII should use average_char_width"
        );
    }

    #[test]
    fn test_encode_win_ansi_latin1_and_specials() {
        assert_eq!(
            encode_win_ansi("São Paulo"),
            vec![b'S', 0xE3, b'o', b' ', b'P', b'a', b'u', b'l', b'o']
        );
        assert_eq!(encode_win_ansi("€5 • ok"), vec![0x80, b'5', b' ', 0x95, b' ', b'o', b'k']);
    }

    #[test]
    fn test_encode_win_ansi_replaces_unencodable() {
        assert_eq!(encode_win_ansi("東京"), b"??".to_vec());
        assert_eq!(encode_win_ansi("a\u{1F4E6}b"), b"a?b".to_vec());
    }

    #[test]
    fn test_measure_str_matches_drawn_bytes() {
        let metrics = get_metrics(LabelFont::Helvetica);
        let text = "Müller 東";
        let drawn = encode_win_ansi(text);
        assert!((metrics.measure_str(text) - metrics.measure_bytes(&drawn)).abs() < 1e-6);
        // The unencodable glyph is drawn as '?', so it takes the '?' width.
        let question = metrics.measure_str("?");
        let width_without = metrics.measure_str("Müller ");
        assert!((metrics.measure_str(text) - width_without - question).abs() < 1e-6);
    }

    #[test]
    fn test_bold_is_not_narrower_than_regular() {
        let text = "Generated: 2024-01-15 10:30 UTC";
        let regular = get_metrics(LabelFont::Helvetica).measure_str(text);
        let bold = get_metrics(LabelFont::HelveticaBold).measure_str(text);
        assert!(bold >= regular, "bold {bold} should be >= regular {regular}");
    }

    #[test]
    fn test_courier_is_monospaced() {
        let metrics = get_metrics(LabelFont::CourierBold);
        assert_eq!(metrics.measure_str("iiii"), metrics.measure_str("WWWW"));
    }

    #[test]
    fn test_measure_mm_scales_with_point_size() {
        let metrics = get_metrics(LabelFont::Courier);
        // 10 glyphs × 0.6em × 12pt = 72pt = 25.4mm
        let width = metrics.measure_mm("0123456789", 12.0);
        assert!((width - 25.4).abs() < 1e-3, "expected 25.4mm, got {width}");
    }
}
