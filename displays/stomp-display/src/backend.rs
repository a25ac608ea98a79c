//! Display backend trait
//!
//! Defines the interface the renderer draws through.

use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Text did not fit the formatting buffer
    BufferOverflow,
}

/// Palette used by the setup screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    Black,
    White,
    Green,
    Red,
    Orange,
}

/// Background color
pub const BACKGROUND: Color = Color::Black;

/// Pixel display backend
///
/// Coordinates are in pixels with the origin top left. Text is anchored
/// at its baseline, so `origin.y` is the baseline row.
pub trait DisplayBackend {
    /// Fill a rectangle
    fn fill_rect(&mut self, rect: Rectangle, color: Color) -> Result<(), DisplayError>;

    /// Fill a triangle
    fn fill_triangle(&mut self, vertices: [Point; 3], color: Color) -> Result<(), DisplayError>;

    /// Draw text with its baseline at `origin.y`; the background is left alone
    fn draw_text(&mut self, origin: Point, text: &str, color: Color) -> Result<(), DisplayError>;

    /// Area `text` would cover if drawn at `origin`
    fn text_bounds(&self, origin: Point, text: &str) -> Rectangle;

    /// Push any buffered content to the panel
    fn flush(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }

    /// Panel size in pixels
    fn size(&self) -> Size;

    /// Rectangle outline, one pixel wide
    fn draw_rect(&mut self, rect: Rectangle, color: Color) -> Result<(), DisplayError> {
        let Rectangle { top_left, size } = rect;
        if size.width == 0 || size.height == 0 {
            return Ok(());
        }
        let right = top_left.x + size.width as i32 - 1;
        let bottom = top_left.y + size.height as i32 - 1;
        self.draw_hline(top_left, size.width, color)?;
        self.draw_hline(Point::new(top_left.x, bottom), size.width, color)?;
        self.draw_vline(top_left, size.height, color)?;
        self.draw_vline(Point::new(right, top_left.y), size.height, color)
    }

    /// Horizontal line starting at `start`
    fn draw_hline(&mut self, start: Point, length: u32, color: Color) -> Result<(), DisplayError> {
        self.fill_rect(Rectangle::new(start, Size::new(length, 1)), color)
    }

    /// Vertical line starting at `start`
    fn draw_vline(&mut self, start: Point, length: u32, color: Color) -> Result<(), DisplayError> {
        self.fill_rect(Rectangle::new(start, Size::new(1, length)), color)
    }
}

impl<T: DisplayBackend + ?Sized> DisplayBackend for &mut T {
    fn fill_rect(&mut self, rect: Rectangle, color: Color) -> Result<(), DisplayError> {
        (**self).fill_rect(rect, color)
    }

    fn fill_triangle(&mut self, vertices: [Point; 3], color: Color) -> Result<(), DisplayError> {
        (**self).fill_triangle(vertices, color)
    }

    fn draw_text(&mut self, origin: Point, text: &str, color: Color) -> Result<(), DisplayError> {
        (**self).draw_text(origin, text, color)
    }

    fn text_bounds(&self, origin: Point, text: &str) -> Rectangle {
        (**self).text_bounds(origin, text)
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        (**self).flush()
    }

    fn size(&self) -> Size {
        (**self).size()
    }
}
