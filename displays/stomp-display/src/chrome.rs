//! Persistent screen chrome
//!
//! The header and the corner triangles stay on screen across menu
//! changes. `Chrome` tracks what is already drawn so a screen change only
//! repaints the content area, and the triangle strip only when the
//! triangles appear or disappear.

use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;

use crate::backend::{Color, DisplayBackend, DisplayError, BACKGROUND};
use crate::layout::{
    band_between_triangles, left_triangle, right_triangle, triangle_strip, CAPTION_Y,
    HEADER_TEXT, HEADER_Y, LINE_LENGTH, LINE_MARGIN_X, LINE_THICKNESS, LINE_Y,
    MIN_CONTENT_TOP, SCREEN_HEIGHT, SCREEN_WIDTH, TRI_MARGIN_L, TRI_MARGIN_R, TRI_SIDE,
};

/// Padding above and below caption glyphs when clearing their band
const CAPTION_PAD: i32 = 3;

/// Header and triangle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chrome {
    header_drawn: bool,
    /// `None` until the strip has been painted once
    triangles: Option<bool>,
    content_top: i32,
}

impl Default for Chrome {
    fn default() -> Self {
        Self::new()
    }
}

impl Chrome {
    pub const fn new() -> Self {
        Self {
            header_drawn: false,
            triangles: None,
            content_top: MIN_CONTENT_TOP,
        }
    }

    /// Forget everything drawn; the next `prepare` repaints all chrome
    pub fn invalidate(&mut self) {
        *self = Self::new();
    }

    /// First row below the header
    pub const fn content_top(&self) -> i32 {
        self.content_top
    }

    /// Whether the triangles are currently shown
    pub const fn triangles_visible(&self) -> bool {
        matches!(self.triangles, Some(true))
    }

    /// Get the screen ready for a new body
    ///
    /// Draws the header if needed, clears the content area (around the
    /// triangle strip when the triangles stay), then shows or hides the
    /// triangles.
    pub fn prepare<B: DisplayBackend>(
        &mut self,
        backend: &mut B,
        show_triangles: bool,
    ) -> Result<(), DisplayError> {
        if !self.header_drawn {
            self.draw_header(backend)?;
        }
        self.clear_content(backend, show_triangles && self.triangles_visible())?;
        self.set_triangles(backend, show_triangles)
    }

    /// Draw a centred caption on the bottom row
    ///
    /// Only the band between the triangles is cleared. If `text` would
    /// crowd the triangles, `short` is used instead.
    pub fn caption<B: DisplayBackend>(
        &mut self,
        backend: &mut B,
        text: &str,
        short: Option<&str>,
    ) -> Result<(), DisplayError> {
        let max_width = (SCREEN_WIDTH - TRI_MARGIN_R - TRI_SIDE - 1) - (TRI_MARGIN_L + TRI_SIDE + 1);

        let mut chosen = text;
        let mut bounds = backend.text_bounds(Point::new(0, CAPTION_Y), text);
        if let Some(short) = short {
            if bounds.size.width as i32 + 4 > max_width {
                chosen = short;
                bounds = backend.text_bounds(Point::new(0, CAPTION_Y), short);
            }
        }

        clear_between_triangles(
            backend,
            bounds.top_left.y - CAPTION_PAD,
            bounds.top_left.y + bounds.size.height as i32 + CAPTION_PAD,
        )?;

        let x = (SCREEN_WIDTH - bounds.size.width as i32) / 2;
        backend.draw_text(Point::new(x, CAPTION_Y), chosen, Color::White)
    }

    fn draw_header<B: DisplayBackend>(&mut self, backend: &mut B) -> Result<(), DisplayError> {
        backend.fill_rect(
            Rectangle::new(Point::zero(), Size::new(SCREEN_WIDTH as u32, (HEADER_Y + 16) as u32)),
            BACKGROUND,
        )?;

        let bounds = backend.text_bounds(Point::new(0, HEADER_Y), HEADER_TEXT);
        let header_bottom = bounds.top_left.y + bounds.size.height as i32;
        let lines_bottom = LINE_Y + LINE_THICKNESS as i32;
        self.content_top = (lines_bottom + 3).max(header_bottom + 3);

        let line = Size::new(LINE_LENGTH, LINE_THICKNESS);
        backend.fill_rect(Rectangle::new(Point::new(LINE_MARGIN_X, LINE_Y), line), Color::White)?;
        backend.fill_rect(
            Rectangle::new(
                Point::new(SCREEN_WIDTH - LINE_MARGIN_X - LINE_LENGTH as i32, LINE_Y),
                line,
            ),
            Color::White,
        )?;

        // Text last so it sits on top of the lines
        let x = (SCREEN_WIDTH - bounds.size.width as i32) / 2;
        backend.draw_text(Point::new(x, HEADER_Y), HEADER_TEXT, Color::White)?;

        self.header_drawn = true;
        Ok(())
    }

    fn clear_content<B: DisplayBackend>(
        &self,
        backend: &mut B,
        preserve_triangles: bool,
    ) -> Result<(), DisplayError> {
        let top = self.content_top;
        let width = SCREEN_WIDTH as u32;

        if preserve_triangles {
            let strip = triangle_strip();
            let strip_bottom = strip.top_left.y + strip.size.height as i32;

            let above = strip.top_left.y - top;
            if above > 0 {
                backend.fill_rect(
                    Rectangle::new(Point::new(0, top), Size::new(width, above as u32)),
                    BACKGROUND,
                )?;
            }
            let below = SCREEN_HEIGHT - strip_bottom;
            if below > 0 {
                backend.fill_rect(
                    Rectangle::new(Point::new(0, strip_bottom), Size::new(width, below as u32)),
                    BACKGROUND,
                )?;
            }
            Ok(())
        } else {
            backend.fill_rect(
                Rectangle::new(Point::new(0, top), Size::new(width, (SCREEN_HEIGHT - top) as u32)),
                BACKGROUND,
            )
        }
    }

    fn set_triangles<B: DisplayBackend>(
        &mut self,
        backend: &mut B,
        show: bool,
    ) -> Result<(), DisplayError> {
        if self.triangles == Some(show) {
            return Ok(());
        }

        backend.fill_rect(triangle_strip(), BACKGROUND)?;
        if show {
            backend.fill_triangle(left_triangle(), Color::White)?;
            backend.fill_triangle(right_triangle(), Color::White)?;
        }
        self.triangles = Some(show);
        Ok(())
    }
}

/// Clear rows `y_top..=y_bottom` between the triangles, leaving them intact
pub fn clear_between_triangles<B: DisplayBackend>(
    backend: &mut B,
    y_top: i32,
    y_bottom: i32,
) -> Result<(), DisplayError> {
    match band_between_triangles(y_top, y_bottom) {
        Some(band) => backend.fill_rect(band, BACKGROUND),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::testing::{Op, RecordingBackend};

    #[test]
    fn test_header_drawn_once() {
        let mut backend = RecordingBackend::default();
        let mut chrome = Chrome::new();

        chrome.prepare(&mut backend, true).unwrap();
        let first = backend.take();
        assert_eq!(RecordingBackend::texts(&first), vec!["setup"]);
        assert_eq!(RecordingBackend::triangles(&first), 2);
        // header baseline 20, ascent 16, descent 4 -> bottom 24
        assert_eq!(chrome.content_top(), 27);

        chrome.prepare(&mut backend, true).unwrap();
        let second = backend.take();
        assert!(RecordingBackend::texts(&second).is_empty());
        assert_eq!(RecordingBackend::triangles(&second), 0);
    }

    #[test]
    fn test_unchanged_triangles_keep_strip() {
        let mut backend = RecordingBackend::default();
        let mut chrome = Chrome::new();
        chrome.prepare(&mut backend, true).unwrap();
        backend.take();

        chrome.prepare(&mut backend, true).unwrap();
        let strip = triangle_strip();
        let ops = backend.take();
        for op in &ops {
            if let Op::Fill(rect, _) = op {
                assert!(rect.intersection(&strip).is_zero_sized(), "{rect:?} touches the strip");
            }
        }
    }

    #[test]
    fn test_hiding_triangles_repaints_strip() {
        let mut backend = RecordingBackend::default();
        let mut chrome = Chrome::new();
        chrome.prepare(&mut backend, true).unwrap();
        backend.take();

        chrome.prepare(&mut backend, false).unwrap();
        let ops = backend.take();
        assert!(ops.contains(&Op::Fill(triangle_strip(), BACKGROUND)));
        assert_eq!(RecordingBackend::triangles(&ops), 0);
        assert!(!chrome.triangles_visible());

        chrome.prepare(&mut backend, true).unwrap();
        assert_eq!(RecordingBackend::triangles(&backend.take()), 2);
    }

    #[test]
    fn test_caption_clears_band_only() {
        let mut backend = RecordingBackend::default();
        let mut chrome = Chrome::new();
        chrome.caption(&mut backend, "LEDs", None).unwrap();

        let ops = backend.take();
        // baseline 126, glyph top 110, bottom 130, padded by 3
        assert_eq!(ops[0], Op::Fill(band_between_triangles(107, 133).unwrap(), BACKGROUND));
        assert_eq!(
            ops[1],
            Op::Text(Point::new(100, CAPTION_Y), "LEDs".into(), Color::White)
        );
    }

    #[test]
    fn test_caption_falls_back_to_short_text() {
        let mut backend = RecordingBackend::default();
        let mut chrome = Chrome::new();
        chrome
            .caption(&mut backend, "Stomp CC numbers and more", Some("Stomp CC"))
            .unwrap();
        assert_eq!(RecordingBackend::texts(&backend.take()), vec!["Stomp CC"]);
    }
}
