//! Panel abstraction and frame painter.
//!
//! Anything that is an `embedded-graphics` binary draw target and can be
//! initialised, cleared, and flushed is a `Panel`. With the `embedded`
//! feature the SSD1306 OLED driver is one.

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyleBuilder;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::{Baseline, Text};

use super::screen::Frame;
use crate::error::Error;

/// A monochrome display the menu can draw on.
pub trait Panel: DrawTarget<Color = BinaryColor> {
    /// Run the controller init sequence.
    fn init_panel(&mut self) -> Result<(), Error>;

    /// Blank the frame buffer (not the glass).
    fn clear_frame(&mut self);

    /// Push the frame buffer to the glass.
    fn present(&mut self) -> Result<(), Error>;
}

fn text_style() -> embedded_graphics::mono_font::MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(BinaryColor::On)
        .build()
}

/// Draw target adapter that blows every pixel up to a `scale`×`scale`
/// block placed relative to `origin`.
struct Scaled<'d, D> {
    target: &'d mut D,
    origin: Point,
    scale: u32,
}

impl<D> Dimensions for Scaled<'_, D>
where
    D: DrawTarget<Color = BinaryColor>,
{
    fn bounding_box(&self) -> Rectangle {
        self.target.bounding_box()
    }
}

impl<D> DrawTarget for Scaled<'_, D>
where
    D: DrawTarget<Color = BinaryColor>,
{
    type Color = BinaryColor;
    type Error = D::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let s = self.scale as i32;
        for Pixel(p, color) in pixels {
            let top_left = self.origin + Point::new(p.x * s, p.y * s);
            self.target
                .fill_solid(&Rectangle::new(top_left, Size::new_equal(self.scale)), color)?;
        }
        Ok(())
    }
}

/// Clear, draw every run of `frame`, and present.
pub fn paint<D: Panel>(panel: &mut D, frame: &Frame) -> Result<(), Error> {
    panel.clear_frame();

    let style = text_style();
    for run in frame.runs() {
        let mut target = Scaled {
            target: &mut *panel,
            origin: run.origin,
            scale: u32::from(run.scale.max(1)),
        };
        let _ = Text::with_baseline(run.text.as_str(), Point::zero(), style, Baseline::Top)
            .draw(&mut target);
    }

    panel.present()
}

#[cfg(feature = "embedded")]
pub use oled::{new_panel, Display};

#[cfg(feature = "embedded")]
mod oled {
    use super::Panel;
    use crate::error::Error;
    use ssd1306::mode::BufferedGraphicsMode;
    use ssd1306::prelude::*;
    use ssd1306::I2CDisplayInterface;
    use ssd1306::Ssd1306;

    /// Type alias for the concrete display driver.
    ///
    /// Generic over the I²C implementation so callers pass in their HAL's
    /// I²C peripheral.
    pub type Display<I2C> =
        Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

    /// Wrap the I²C bus in an SSD1306 driver. The panel is not touched
    /// until `Panel::init_panel`.
    pub fn new_panel<I2C>(i2c: I2C, address: u8) -> Display<I2C>
    where
        I2C: embedded_hal::i2c::I2c,
    {
        let interface = I2CDisplayInterface::new_custom_address(i2c, address);
        Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode()
    }

    impl<I2C> Panel for Display<I2C>
    where
        I2C: embedded_hal::i2c::I2c,
    {
        fn init_panel(&mut self) -> Result<(), Error> {
            self.init().map_err(|_| Error::DisplayInit)?;
            self.clear_buffer();
            self.flush().map_err(|_| Error::DisplayInit)
        }

        fn clear_frame(&mut self) {
            self.clear_buffer();
        }

        fn present(&mut self) -> Result<(), Error> {
            self.flush().map_err(|_| Error::Display)
        }
    }
}
