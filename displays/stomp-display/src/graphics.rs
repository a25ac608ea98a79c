//! embedded-graphics backend
//!
//! Adapts any RGB565 `DrawTarget` (the ST7789 driver on hardware, a
//! `MockDisplay` in tests) to [`DisplayBackend`].

use embedded_graphics::mono_font::ascii::FONT_10X20;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle, Triangle};
use embedded_graphics::text::{Baseline, Text};

use crate::backend::{Color, DisplayBackend, DisplayError};

impl From<Color> for Rgb565 {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => Rgb565::BLACK,
            Color::White => Rgb565::WHITE,
            Color::Green => Rgb565::GREEN,
            Color::Red => Rgb565::RED,
            Color::Orange => Rgb565::new(31, 41, 0),
        }
    }
}

/// [`DisplayBackend`] over an embedded-graphics draw target
pub struct GraphicsBackend<D> {
    target: D,
}

impl<D> GraphicsBackend<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub fn new(target: D) -> Self {
        Self { target }
    }

    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    pub fn into_inner(self) -> D {
        self.target
    }
}

fn text(text: &str, origin: Point, color: Color) -> Text<'_, MonoTextStyle<'static, Rgb565>> {
    let style = MonoTextStyle::new(&FONT_10X20, color.into());
    Text::with_baseline(text, origin, style, Baseline::Alphabetic)
}

impl<D> DisplayBackend for GraphicsBackend<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn fill_rect(&mut self, rect: Rectangle, color: Color) -> Result<(), DisplayError> {
        self.target
            .fill_solid(&rect, color.into())
            .map_err(|_| DisplayError::Communication)
    }

    fn fill_triangle(&mut self, vertices: [Point; 3], color: Color) -> Result<(), DisplayError> {
        Triangle::new(vertices[0], vertices[1], vertices[2])
            .into_styled(PrimitiveStyle::with_fill(color.into()))
            .draw(&mut self.target)
            .map_err(|_| DisplayError::Communication)
    }

    fn draw_text(&mut self, origin: Point, value: &str, color: Color) -> Result<(), DisplayError> {
        text(value, origin, color)
            .draw(&mut self.target)
            .map(|_| ())
            .map_err(|_| DisplayError::Communication)
    }

    fn text_bounds(&self, origin: Point, value: &str) -> Rectangle {
        text(value, origin, Color::White).bounding_box()
    }

    fn size(&self) -> Size {
        self.target.bounding_box().size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::mock_display::MockDisplay;

    fn backend() -> GraphicsBackend<MockDisplay<Rgb565>> {
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        display.set_allow_out_of_bounds_drawing(true);
        GraphicsBackend::new(display)
    }

    #[test]
    fn test_fill_rect_maps_colors() {
        let mut backend = backend();
        backend
            .fill_rect(Rectangle::new(Point::new(2, 3), Size::new(4, 2)), Color::Orange)
            .unwrap();

        let display = backend.into_inner();
        assert_eq!(display.get_pixel(Point::new(2, 3)), Some(Rgb565::new(31, 41, 0)));
        assert_eq!(display.get_pixel(Point::new(5, 4)), Some(Rgb565::new(31, 41, 0)));
        assert_eq!(display.get_pixel(Point::new(6, 4)), None);
    }

    #[test]
    fn test_text_bounds_sit_on_baseline() {
        let backend = backend();
        let bounds = backend.text_bounds(Point::new(10, 40), "123");
        assert_eq!(bounds.size.width, 30);
        assert_eq!(bounds.top_left.x, 10);
        assert!(bounds.top_left.y < 40);
        assert!(bounds.top_left.y + bounds.size.height as i32 > 40);
    }

    #[test]
    fn test_triangle_is_filled() {
        let mut backend = backend();
        backend
            .fill_triangle(
                [Point::new(0, 10), Point::new(20, 0), Point::new(20, 20)],
                Color::White,
            )
            .unwrap();
        let display = backend.into_inner();
        assert_eq!(display.get_pixel(Point::new(15, 10)), Some(Rgb565::WHITE));
        assert_eq!(display.get_pixel(Point::new(1, 1)), None);
    }
}
