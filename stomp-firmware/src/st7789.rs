//! ST7789 TFT Driver
//!
//! Driver for the 1.14" 135x240 ST7789 panel over a write-only SPI bus,
//! used in landscape (240x135). There is no frame buffer: every fill sets
//! an address window and streams RGB565 pixels straight to the panel.

use embedded_graphics::pixelcolor::raw::{RawData, RawU16};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

/// Panel size in landscape
const WIDTH: u16 = 240;
const HEIGHT: u16 = 135;

/// Offset of the visible area inside the controller's 240x320 RAM
const COL_OFFSET: u16 = 40;
const ROW_OFFSET: u16 = 53;

/// Pixels streamed per SPI transfer
const CHUNK_PIXELS: usize = 64;

/// ST7789 commands
#[allow(dead_code)]
mod cmd {
    pub const SWRESET: u8 = 0x01;
    pub const SLPOUT: u8 = 0x11;
    pub const NORON: u8 = 0x13;
    pub const INVON: u8 = 0x21;
    pub const DISPOFF: u8 = 0x28;
    pub const DISPON: u8 = 0x29;
    pub const CASET: u8 = 0x2A;
    pub const RASET: u8 = 0x2B;
    pub const RAMWR: u8 = 0x2C;
    pub const MADCTL: u8 = 0x36;
    pub const COLMOD: u8 = 0x3A;
}

/// MADCTL: row/column exchange plus column mirror gives landscape
const MADCTL_LANDSCAPE: u8 = 0x60;
/// COLMOD: 16 bits per pixel
const COLMOD_RGB565: u8 = 0x55;

/// Driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum Error {
    /// SPI transfer failed
    Spi,
    /// Chip select or data/command pin failed
    Pin,
}

/// ST7789 driver
pub struct St7789<SPI, DC, CS> {
    spi: SPI,
    dc: DC,
    cs: CS,
}

impl<SPI, DC, CS> St7789<SPI, DC, CS>
where
    SPI: SpiBus<u8>,
    DC: OutputPin,
    CS: OutputPin,
{
    /// Create a new ST7789 driver
    pub fn new(spi: SPI, dc: DC, cs: CS) -> Self {
        Self { spi, dc, cs }
    }

    /// Initialize the panel and clear it to black
    pub fn init(&mut self, delay: &mut impl DelayNs) -> Result<(), Error> {
        self.command(cmd::SWRESET, &[])?;
        delay.delay_ms(150);
        self.command(cmd::SLPOUT, &[])?;
        delay.delay_ms(120);

        self.command(cmd::COLMOD, &[COLMOD_RGB565])?;
        self.command(cmd::MADCTL, &[MADCTL_LANDSCAPE])?;
        // This panel is wired with inverted colours
        self.command(cmd::INVON, &[])?;
        self.command(cmd::NORON, &[])?;
        delay.delay_ms(10);

        self.fill_area(0, 0, WIDTH, HEIGHT, 0x0000)?;
        self.command(cmd::DISPON, &[])?;
        delay.delay_ms(10);
        Ok(())
    }

    /// Turn the panel off
    pub fn sleep(&mut self) -> Result<(), Error> {
        self.command(cmd::DISPOFF, &[])
    }

    fn command(&mut self, command: u8, params: &[u8]) -> Result<(), Error> {
        self.cs.set_low().map_err(|_| Error::Pin)?;
        let result = self.send(command, params);
        self.cs.set_high().map_err(|_| Error::Pin)?;
        result
    }

    fn send(&mut self, command: u8, params: &[u8]) -> Result<(), Error> {
        self.dc.set_low().map_err(|_| Error::Pin)?;
        self.spi.write(&[command]).map_err(|_| Error::Spi)?;
        if !params.is_empty() {
            self.dc.set_high().map_err(|_| Error::Pin)?;
            self.spi.write(params).map_err(|_| Error::Spi)?;
        }
        self.spi.flush().map_err(|_| Error::Spi)
    }

    /// Select the inclusive window `x0..=x1`, `y0..=y1` and start a RAM write
    fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), Error> {
        let (x0, x1) = (x0 + COL_OFFSET, x1 + COL_OFFSET);
        let (y0, y1) = (y0 + ROW_OFFSET, y1 + ROW_OFFSET);

        self.command(
            cmd::CASET,
            &[(x0 >> 8) as u8, x0 as u8, (x1 >> 8) as u8, x1 as u8],
        )?;
        self.command(
            cmd::RASET,
            &[(y0 >> 8) as u8, y0 as u8, (y1 >> 8) as u8, y1 as u8],
        )
    }

    /// Stream pixels into the current window
    fn write_pixels(&mut self, pixels: impl IntoIterator<Item = u16>) -> Result<(), Error> {
        self.cs.set_low().map_err(|_| Error::Pin)?;
        let result = self.stream(pixels);
        self.cs.set_high().map_err(|_| Error::Pin)?;
        result
    }

    fn stream(&mut self, pixels: impl IntoIterator<Item = u16>) -> Result<(), Error> {
        self.dc.set_low().map_err(|_| Error::Pin)?;
        self.spi.write(&[cmd::RAMWR]).map_err(|_| Error::Spi)?;
        self.dc.set_high().map_err(|_| Error::Pin)?;

        let mut chunk = [0u8; CHUNK_PIXELS * 2];
        let mut len = 0;
        for pixel in pixels {
            chunk[len..len + 2].copy_from_slice(&pixel.to_be_bytes());
            len += 2;
            if len == chunk.len() {
                self.spi.write(&chunk).map_err(|_| Error::Spi)?;
                len = 0;
            }
        }
        if len > 0 {
            self.spi.write(&chunk[..len]).map_err(|_| Error::Spi)?;
        }
        self.spi.flush().map_err(|_| Error::Spi)
    }

    fn fill_area(&mut self, x: u16, y: u16, width: u16, height: u16, raw: u16) -> Result<(), Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.set_window(x, y, x + width - 1, y + height - 1)?;
        let count = usize::from(width) * usize::from(height);
        self.write_pixels(core::iter::repeat(raw).take(count))
    }
}

fn raw(color: Rgb565) -> u16 {
    RawU16::from(color).into_inner()
}

impl<SPI, DC, CS> OriginDimensions for St7789<SPI, DC, CS> {
    fn size(&self) -> Size {
        Size::new(u32::from(WIDTH), u32::from(HEIGHT))
    }
}

impl<SPI, DC, CS> DrawTarget for St7789<SPI, DC, CS>
where
    SPI: SpiBus<u8>,
    DC: OutputPin,
    CS: OutputPin,
{
    type Color = Rgb565;
    type Error = Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let bounds = self.bounding_box();
        for Pixel(point, color) in pixels {
            if !bounds.contains(point) {
                continue;
            }
            let (x, y) = (point.x as u16, point.y as u16);
            self.set_window(x, y, x, y)?;
            self.write_pixels(core::iter::once(raw(color)))?;
        }
        Ok(())
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        let clipped = area.intersection(&self.bounding_box());
        if clipped != *area {
            // Partially off screen: fall back to per-pixel clipping
            return self.draw_iter(
                area.points()
                    .zip(colors)
                    .map(|(point, color)| Pixel(point, color)),
            );
        }
        let Some(bottom_right) = area.bottom_right() else {
            return Ok(());
        };

        self.set_window(
            area.top_left.x as u16,
            area.top_left.y as u16,
            bottom_right.x as u16,
            bottom_right.y as u16,
        )?;
        self.write_pixels(colors.into_iter().map(raw))
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        self.fill_area(
            area.top_left.x as u16,
            area.top_left.y as u16,
            area.size.width as u16,
            area.size.height as u16,
            raw(color),
        )
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill_area(0, 0, WIDTH, HEIGHT, raw(color))
    }
}
