#![forbid(unsafe_code)]

//! Built-in 3×5 bitmap font.
//!
//! Covers ASCII letters (case-folded), digits, and basic punctuation. Every
//! glyph sits in a 3-column, 5-row grid and advances 4 columns. Characters
//! outside the table render as a hollow box.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Glyph grid width in font units.
pub const GLYPH_COLUMNS: u32 = 3;
/// Glyph grid height in font units.
pub const GLYPH_ROWS: u32 = 5;
/// Horizontal advance per narrow glyph in font units.
pub const ADVANCE: u32 = 4;

/// Cap height as a fraction of the nominal font size.
const CAP_HEIGHT_RATIO: f64 = 0.7;

/// Hollow box drawn for missing glyphs.
const TOFU: [u8; 5] = [0b111, 0b101, 0b101, 0b101, 0b111];

/// Rows of a glyph, top to bottom; bit 2 is the left column.
#[must_use]
pub fn glyph(ch: char) -> [u8; 5] {
    match ch.to_ascii_uppercase() {
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b011, 0b100, 0b100, 0b100, 0b011],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b110, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b110, 0b100, 0b100],
        'G' => [0b011, 0b100, 0b101, 0b101, 0b011],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b001, 0b001, 0b001, 0b101, 0b010],
        'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => [0b110, 0b101, 0b101, 0b101, 0b101],
        'O' => [0b010, 0b101, 0b101, 0b101, 0b010],
        'P' => [0b110, 0b101, 0b110, 0b100, 0b100],
        'Q' => [0b010, 0b101, 0b101, 0b110, 0b011],
        'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        'S' => [0b011, 0b100, 0b010, 0b001, 0b110],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'W' => [0b101, 0b101, 0b111, 0b111, 0b101],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b110, 0b001, 0b010, 0b100, 0b111],
        '3' => [0b110, 0b001, 0b010, 0b001, 0b110],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b110, 0b001, 0b110],
        '6' => [0b011, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b010, 0b010, 0b010],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b110],
        ' ' => [0; 5],
        '?' => [0b110, 0b001, 0b010, 0b000, 0b010],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '\'' => [0b010, 0b010, 0b000, 0b000, 0b000],
        _ => TOFU,
    }
}

/// Size of one font unit in points for a nominal font `size`.
#[inline]
#[must_use]
pub fn unit(size: f64) -> f64 {
    size * CAP_HEIGHT_RATIO / f64::from(GLYPH_ROWS)
}

/// One laid-out glyph: its rows and x offset in font units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedGlyph {
    pub rows: [u8; 5],
    pub column: u32,
}

/// Lay out `text` on a single line.
///
/// Zero-width graphemes are skipped; wide graphemes take two advances.
/// Returns the glyphs and the total width in font units (without trailing
/// spacing).
#[must_use]
pub fn layout(text: &str) -> (Vec<PlacedGlyph>, u32) {
    let mut glyphs = Vec::new();
    let mut column = 0u32;
    for grapheme in text.graphemes(true) {
        let width = grapheme.width() as u32;
        if width == 0 {
            continue;
        }
        let Some(ch) = grapheme.chars().next() else {
            continue;
        };
        glyphs.push(PlacedGlyph {
            rows: glyph(ch),
            column,
        });
        column += ADVANCE * width;
    }
    let total = column.saturating_sub(ADVANCE - GLYPH_COLUMNS);
    (glyphs, total)
}

/// Width and height of `text` in points at nominal `size`.
#[must_use]
pub fn measure(text: &str, size: f64) -> (f64, f64) {
    let (_, columns) = layout(text);
    let u = unit(size);
    (f64::from(columns) * u, f64::from(GLYPH_ROWS) * u)
}

/// Greedy word wrap of `text` to `max_width` points at `size`.
#[must_use]
pub fn wrap(text: &str, size: f64, max_width: f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let candidate = if line.is_empty() {
            word.to_string()
        } else {
            format!("{line} {word}")
        };
        if !line.is_empty() && measure(&candidate, size).0 > max_width {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        } else {
            line = candidate;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercase_folds_to_uppercase() {
        assert_eq!(glyph('a'), glyph('A'));
    }

    #[test]
    fn unknown_char_is_tofu() {
        assert_eq!(glyph('~'), TOFU);
    }

    #[test]
    fn layout_width_excludes_trailing_gap() {
        let (glyphs, width) = layout("AB");
        assert_eq!(glyphs.len(), 2);
        assert_eq!(glyphs[1].column, ADVANCE);
        assert_eq!(width, ADVANCE + GLYPH_COLUMNS);
        assert_eq!(layout("").1, 0);
    }

    #[test]
    fn wide_grapheme_takes_two_advances() {
        let (glyphs, width) = layout("\u{4E2D}A");
        assert_eq!(glyphs[1].column, 2 * ADVANCE);
        assert_eq!(width, 2 * ADVANCE + GLYPH_COLUMNS);
    }

    #[test]
    fn wrap_respects_width() {
        let size = 10.0;
        let max = measure("HELLO WORLD", size).0 - 1.0;
        let lines = wrap("hello world again", size, max);
        assert!(lines.len() >= 2);
        for line in &lines {
            assert!(measure(line, size).0 <= max || !line.contains(' '));
        }
    }
}
