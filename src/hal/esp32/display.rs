//! SSD1306 OLED status display for ESP32.
//!
//! Renders the two status lines in a 6x10 font.
//!
//! # Wiring
//!
//! - SDA → GPIO8
//! - SCL → GPIO9
//! - VCC → 3.3V
//! - GND → GND

use crate::status::StatusLines;
use crate::traits::StatusDisplay;
use embedded_graphics::{
    mono_font::{ascii::FONT_6X10, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    text::Text,
};
use esp_idf_hal::i2c::I2cDriver;
use ssd1306::{mode::BufferedGraphicsMode, prelude::*, I2CDisplayInterface, Ssd1306};

/// SSD1306 display type alias for cleaner code.
type DisplayDriver<'d> = Ssd1306<
    I2CInterface<I2cDriver<'d>>,
    DisplaySize128x64,
    BufferedGraphicsMode<DisplaySize128x64>,
>;

/// Baseline of the first status line.
const TOP_BASELINE: i32 = 24;
/// Baseline of the second status line.
const BOTTOM_BASELINE: i32 = 40;

/// SSD1306 OLED display for ESP32.
///
/// # Display Layout
///
/// ```text
/// ┌────────────────────────────┐
/// │                            │
/// │  Moist: 42%                │
/// │  AUTO   OK                 │
/// │                            │
/// └────────────────────────────┘
/// ```
pub struct Esp32Display<'d> {
    display: DisplayDriver<'d>,
}

impl<'d> Esp32Display<'d> {
    /// Wraps an I2C driver configured for GPIO8/9.
    ///
    /// The panel is not touched until [`init`](StatusDisplay::init).
    pub fn new(i2c: I2cDriver<'d>) -> Self {
        let interface = I2CDisplayInterface::new(i2c);
        let display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();

        Self { display }
    }

    fn blank(&mut self) -> Result<(), DisplayError> {
        self.display.clear(BinaryColor::Off)?;
        self.display.flush()?;
        Ok(())
    }

    fn draw_lines(&mut self, top: &str, bottom: Option<&str>) -> Result<(), DisplayError> {
        self.display.clear(BinaryColor::Off)?;

        let text_style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        Text::new(top, Point::new(4, TOP_BASELINE), text_style).draw(&mut self.display)?;
        if let Some(bottom) = bottom {
            Text::new(bottom, Point::new(4, BOTTOM_BASELINE), text_style)
                .draw(&mut self.display)?;
        }

        self.display.flush()?;
        Ok(())
    }
}

impl StatusDisplay for Esp32Display<'_> {
    type Error = DisplayError;

    fn init(&mut self) -> Result<(), Self::Error> {
        self.display.init()?;
        self.blank()
    }

    fn render(&mut self, lines: &StatusLines) -> Result<(), Self::Error> {
        self.draw_lines(lines.top.as_str(), Some(lines.bottom.as_str()))
    }

    fn show_message(&mut self, line1: &str, line2: Option<&str>) -> Result<(), Self::Error> {
        self.draw_lines(line1, line2)
    }
}

/// Display error type.
#[derive(Debug)]
pub struct DisplayError;

impl From<display_interface::DisplayError> for DisplayError {
    fn from(_: display_interface::DisplayError) -> Self {
        DisplayError
    }
}
