//! Mutable RGB pixel grid and the drawing primitives.
//!
//! All drawing is an opaque overwrite (last draw wins, no blending) and all
//! drawing operations are total: out-of-range coordinates are clipped or
//! ignored, never errors. Only construction validates.

use crate::{
    color::Rgb,
    error::{RasterfigError, RasterfigResult},
    font::{self, ADVANCE_X, LINE_HEIGHT},
};

/// In-memory drawing surface: a row-major `width * height` grid of RGB
/// triples, allocated once at construction and never resized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>, // width * height * 3, row-major
}

impl Canvas {
    /// Creates a canvas with every pixel set to `background`.
    pub fn new(width: u32, height: u32, background: Rgb) -> RasterfigResult<Self> {
        if width == 0 || height == 0 {
            return Err(RasterfigError::validation(
                "canvas width/height must be non-zero",
            ));
        }

        let mut pixels = vec![0u8; width as usize * height as usize * 3];
        for px in pixels.chunks_exact_mut(3) {
            px.copy_from_slice(&background.to_array());
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw pixel buffer, row-major RGB, exactly `width * height * 3` bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// One row of raw RGB bytes. `y` must be in bounds.
    pub(crate) fn row(&self, y: u32) -> &[u8] {
        let stride = self.width as usize * 3;
        let start = y as usize * stride;
        &self.pixels[start..start + stride]
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Writes one pixel. Out-of-bounds coordinates are silently ignored;
    /// shapes near the edges rely on this.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgb) {
        if !self.in_bounds(x, y) {
            return;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        self.pixels[idx..idx + 3].copy_from_slice(&color.to_array());
    }

    /// Reads one pixel back, or `None` when out of bounds.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb> {
        if !self.in_bounds(x, y) {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        Some(Rgb::new(
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
        ))
    }

    /// Fills the axis-aligned rectangle spanning the two corners, inclusive
    /// on both ends. Corners may be given in any order; the rectangle is
    /// clamped to the canvas bounds.
    pub fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb) {
        let lx = x0.min(x1).max(0);
        let hx = x0.max(x1).min(self.width as i32 - 1);
        let ly = y0.min(y1).max(0);
        let hy = y0.max(y1).min(self.height as i32 - 1);
        if lx > hx || ly > hy {
            return;
        }

        let rgb = color.to_array();
        let stride = self.width as usize * 3;
        for y in ly..=hy {
            let row_start = y as usize * stride;
            let span = &mut self.pixels[row_start + lx as usize * 3..row_start + (hx as usize + 1) * 3];
            for px in span.chunks_exact_mut(3) {
                px.copy_from_slice(&rgb);
            }
        }
    }

    /// Draws the 4 edges of the rectangle (outline only, not filled).
    pub fn draw_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb) {
        self.draw_line(x0, y0, x1, y0, color);
        self.draw_line(x0, y1, x1, y1, color);
        self.draw_line(x0, y0, x0, y1, color);
        self.draw_line(x1, y0, x1, y1, color);
    }

    /// Rasterizes a straight line between two integer points with integer
    /// Bresenham stepping: one pixel per step, no duplicates, no gaps, and a
    /// bit-reproducible pixel path for any slope.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let mut x = x0;
        let mut y = y0;

        loop {
            self.set_pixel(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Renders `text` as fixed 5x7 glyphs starting at `(x, y)`, advancing
    /// the cursor 6 px per character. `'\n'` resets the horizontal cursor to
    /// `x` and advances the vertical cursor by 9 px. Characters outside the
    /// font table render as `?`.
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Rgb) {
        let mut cursor_x = x;
        let mut cursor_y = y;

        for ch in text.chars() {
            if ch == '\n' {
                cursor_x = x;
                cursor_y += LINE_HEIGHT;
                continue;
            }

            let glyph = font::glyph(ch);
            for (row_idx, row) in glyph.iter().enumerate() {
                for (col_idx, marker) in row.bytes().enumerate() {
                    if marker == b'#' {
                        self.set_pixel(cursor_x + col_idx as i32, cursor_y + row_idx as i32, color);
                    }
                }
            }
            cursor_x += ADVANCE_X;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{ACCENT, INK, WHITE};

    #[test]
    fn construct_fills_background() {
        let c = Canvas::new(4, 3, ACCENT).unwrap();
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(c.pixel(x, y), Some(ACCENT));
            }
        }
        assert_eq!(c.pixels().len(), 4 * 3 * 3);
    }

    #[test]
    fn construct_rejects_zero_dimensions() {
        assert!(Canvas::new(0, 10, WHITE).is_err());
        assert!(Canvas::new(10, 0, WHITE).is_err());
    }

    #[test]
    fn set_pixel_roundtrips_in_bounds() {
        let mut c = Canvas::new(8, 8, WHITE).unwrap();
        c.set_pixel(3, 5, INK);
        assert_eq!(c.pixel(3, 5), Some(INK));
    }

    #[test]
    fn set_pixel_out_of_bounds_is_a_noop() {
        let mut c = Canvas::new(8, 8, WHITE).unwrap();
        let before = c.clone();
        c.set_pixel(-1, 0, INK);
        c.set_pixel(0, -1, INK);
        c.set_pixel(8, 0, INK);
        c.set_pixel(0, 8, INK);
        assert_eq!(c, before);
        assert_eq!(c.pixel(8, 0), None);
    }

    fn painted(c: &Canvas, color: Rgb) -> Vec<(i32, i32)> {
        let mut out = Vec::new();
        for y in 0..c.height() as i32 {
            for x in 0..c.width() as i32 {
                if c.pixel(x, y) == Some(color) {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn horizontal_line_plots_exact_span() {
        let mut c = Canvas::new(8, 8, WHITE).unwrap();
        c.draw_line(0, 0, 4, 0, INK);
        assert_eq!(painted(&c, INK), vec![(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]);
    }

    #[test]
    fn diagonal_line_plots_exact_diagonal() {
        let mut c = Canvas::new(8, 8, WHITE).unwrap();
        c.draw_line(0, 0, 4, 4, INK);
        assert_eq!(painted(&c, INK), vec![(0, 0), (1, 1), (2, 2), (3, 3), (4, 4)]);
    }

    #[test]
    fn line_is_direction_independent_for_verticals() {
        let mut down = Canvas::new(8, 8, WHITE).unwrap();
        let mut up = Canvas::new(8, 8, WHITE).unwrap();
        down.draw_line(2, 1, 2, 6, INK);
        up.draw_line(2, 6, 2, 1, INK);
        assert_eq!(painted(&down, INK), painted(&up, INK));
    }

    #[test]
    fn line_clips_outside_canvas() {
        let mut c = Canvas::new(4, 4, WHITE).unwrap();
        c.draw_line(-2, 1, 6, 1, INK);
        assert_eq!(painted(&c, INK), vec![(0, 1), (1, 1), (2, 1), (3, 1)]);
    }

    #[test]
    fn fill_rect_is_idempotent_and_order_free() {
        let mut once = Canvas::new(10, 10, WHITE).unwrap();
        once.fill_rect(2, 2, 5, 5, INK);

        let mut twice = once.clone();
        twice.fill_rect(5, 5, 2, 2, INK);
        assert_eq!(once, twice);

        assert_eq!(once.pixel(2, 2), Some(INK));
        assert_eq!(once.pixel(5, 5), Some(INK));
        assert_eq!(once.pixel(6, 5), Some(WHITE));
        assert_eq!(once.pixel(1, 2), Some(WHITE));
    }

    #[test]
    fn fill_rect_clamps_to_bounds() {
        let mut c = Canvas::new(4, 4, WHITE).unwrap();
        c.fill_rect(-3, -3, 1, 1, INK);
        assert_eq!(
            painted(&c, INK),
            vec![(0, 0), (1, 0), (0, 1), (1, 1)]
        );

        let before = c.clone();
        c.fill_rect(10, 10, 20, 20, INK);
        assert_eq!(c, before);
    }

    #[test]
    fn draw_rect_is_union_of_four_edges() {
        let mut outline = Canvas::new(12, 12, WHITE).unwrap();
        outline.draw_rect(2, 3, 8, 9, INK);

        let mut edges = Canvas::new(12, 12, WHITE).unwrap();
        edges.draw_line(2, 3, 8, 3, INK);
        edges.draw_line(2, 9, 8, 9, INK);
        edges.draw_line(2, 3, 2, 9, INK);
        edges.draw_line(8, 3, 8, 9, INK);

        assert_eq!(painted(&outline, INK), painted(&edges, INK));
        // interior stays untouched
        assert_eq!(outline.pixel(5, 6), Some(WHITE));
    }

    #[test]
    fn draw_text_renders_the_a_glyph_exactly() {
        let mut c = Canvas::new(5, 7, WHITE).unwrap();
        c.draw_text(0, 0, "A", INK);

        let glyph = crate::font::glyph('A');
        for (y, row) in glyph.iter().enumerate() {
            for (x, marker) in row.bytes().enumerate() {
                let expected = if marker == b'#' { INK } else { WHITE };
                assert_eq!(c.pixel(x as i32, y as i32), Some(expected), "at ({x},{y})");
            }
        }
    }

    #[test]
    fn draw_text_advances_and_wraps() {
        let mut c = Canvas::new(20, 20, WHITE).unwrap();
        c.draw_text(1, 1, "I\nI", INK);
        // 'I' column 2 is fully set; second line starts 9 px lower at the same x.
        assert_eq!(c.pixel(1 + 2, 1 + 1), Some(INK));
        assert_eq!(c.pixel(1 + 2, 1 + 9 + 1), Some(INK));
    }

    #[test]
    fn draw_text_lowercase_matches_uppercase() {
        let mut lower = Canvas::new(40, 10, WHITE).unwrap();
        let mut upper = Canvas::new(40, 10, WHITE).unwrap();
        lower.draw_text(0, 0, "abc-12", INK);
        upper.draw_text(0, 0, "ABC-12", INK);
        assert_eq!(lower, upper);
    }
}
