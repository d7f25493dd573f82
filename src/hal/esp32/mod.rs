//! ESP32-S3 DevKitC hardware abstraction layer for the plant pot.
//!
//! # Hardware Configuration
//!
//! - **MCU**: ESP32-S3 DevKitC-1
//! - **Moisture**: capacitive soil probe on ADC1
//! - **Light**: two photoresistor dividers on ADC1, left and right of the pot
//! - **Reservoir**: float switch to ground (closed = water present)
//! - **Mode button**: BOOT button, falling-edge interrupt
//! - **Pump**: relay module driving a 5V submersible pump
//! - **Motor**: 28BYJ-48 stepper on a ULN2003 board
//! - **Display**: SSD1306 128x64 OLED (I2C, optional)
//!
//! # Pin Assignments
//!
//! See the [`pins`] module for GPIO assignments.

mod button;
mod clock;
mod io;

pub use button::Esp32ModeButton;
pub use clock::Esp32Clock;
pub use io::Esp32Io;

#[cfg(feature = "display")]
mod display;
#[cfg(feature = "display")]
pub use display::{DisplayError, Esp32Display};

/// Pin assignments for the ESP32-S3 DevKitC.
///
/// All analog inputs sit on ADC1 so they stay usable with WiFi drivers linked.
pub mod pins {
    // =========================================================================
    // Analog Sensors (ADC1)
    // =========================================================================

    /// Soil moisture probe (ADC1_CH0)
    pub const MOISTURE: i32 = 1;

    /// Left light sensor (ADC1_CH1)
    pub const LIGHT_LEFT: i32 = 2;

    /// Right light sensor (ADC1_CH2)
    pub const LIGHT_RIGHT: i32 = 3;

    // =========================================================================
    // Digital Inputs
    // =========================================================================

    /// Reservoir float switch, internal pull-up, high = water present
    pub const RESERVOIR: i32 = 4;

    /// Mode toggle button (BOOT button, active low)
    pub const MODE_BUTTON: i32 = 0;

    // =========================================================================
    // Outputs
    // =========================================================================

    /// Pump relay
    pub const PUMP: i32 = 5;

    /// Buzzer (reserved, held low)
    pub const BUZZER: i32 = 6;

    /// Green LED, lit in automatic mode
    pub const MODE_LED: i32 = 7;

    /// Red LED, lit when the reservoir is low
    pub const FAULT_LED: i32 = 15;

    // =========================================================================
    // Stepper (ULN2003 IN1..IN4)
    // =========================================================================

    /// Coil driver inputs, in sequence order
    pub const STEPPER: [i32; 4] = [11, 12, 13, 14];

    // =========================================================================
    // I2C Display (SSD1306)
    // =========================================================================

    /// I2C data line
    pub const I2C_SDA: i32 = 8;

    /// I2C clock line
    pub const I2C_SCL: i32 = 9;

    /// Default I2C address for SSD1306 OLED
    pub const OLED_I2C_ADDR: u8 = 0x3C;
}
