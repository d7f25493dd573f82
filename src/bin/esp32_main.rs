//! ESP32-S3 plant pot controller.
//!
//! This is the main entry point for the physical hardware. It runs a 10Hz
//! cooperative loop that:
//! - Samples soil moisture once per second
//! - Waters the plant when the soil is dry and the reservoir has water
//! - Turns the pot toward the brighter light sensor
//! - Renders moisture, mode, and reservoir state to the display and LEDs
//!
//! The mode button and the moisture completion handler write into a static
//! [`SystemState`]; the loop only reads it.
//!
//! # Build
//!
//! ```bash
//! # Status on the serial log
//! cargo build --release --features esp32 --bin esp32_main
//!
//! # With SSD1306 OLED
//! cargo build --release --features display --bin esp32_main
//! ```

use esp_idf_hal::adc::oneshot::AdcDriver;
use esp_idf_hal::delay::Ets;
use esp_idf_hal::gpio::{OutputPin, PinDriver};
use esp_idf_hal::peripherals::Peripherals;
use smart_pot::hal::esp32::{Esp32Clock, Esp32Io, Esp32ModeButton};
use smart_pot::hal::CoilStepper;
use smart_pot::schedule::Ticker;
use smart_pot::traits::Clock;
use smart_pot::{Config, DeviceConfig, PlantController, SystemState};
use std::thread;
use std::time::Duration;

/// State shared with the interrupt handlers.
static STATE: SystemState = SystemState::new();

fn main() -> anyhow::Result<()> {
    // Initialize ESP-IDF
    esp_idf_hal::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    // =========================================================================
    // Configuration
    // =========================================================================
    let config = Config::default()
        .with_device(DeviceConfig::default().with_name(option_env!("POT_NAME").unwrap_or("SmartPot")));

    let peripherals = Peripherals::take()?;
    let pins = peripherals.pins;

    // =========================================================================
    // Sensors and Outputs (ADC1 on GPIO1-3, float switch GPIO4)
    // =========================================================================
    let adc1 = AdcDriver::new(peripherals.adc1)?;
    let io = Esp32Io::new(
        &STATE,
        &adc1,
        pins.gpio1,
        pins.gpio2,
        pins.gpio3,
        pins.gpio4,
        [
            pins.gpio5.downgrade_output(),
            pins.gpio6.downgrade_output(),
            pins.gpio7.downgrade_output(),
            pins.gpio15.downgrade_output(),
        ],
    )?;
    log::info!("sensors ready (moisture GPIO1, light GPIO2/3, reservoir GPIO4)");

    // =========================================================================
    // Mode Button (GPIO0 falling edge)
    // =========================================================================
    let mut button = Esp32ModeButton::new(&STATE, pins.gpio0)?;
    log::info!("mode button ready (GPIO0)");

    // =========================================================================
    // Stepper (ULN2003 on GPIO11-14)
    // =========================================================================
    let coils = [
        PinDriver::output(pins.gpio11.downgrade_output())?,
        PinDriver::output(pins.gpio12.downgrade_output())?,
        PinDriver::output(pins.gpio13.downgrade_output())?,
        PinDriver::output(pins.gpio14.downgrade_output())?,
    ];
    let stepper = CoilStepper::new(coils, Ets, config.tracking.steps_per_revolution);
    log::info!("stepper ready (GPIO11-14)");

    // =========================================================================
    // Display (SSD1306 on GPIO8/9, or the serial log)
    // =========================================================================
    #[cfg(feature = "display")]
    let display = {
        use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
        use esp_idf_hal::prelude::*;
        use smart_pot::hal::esp32::Esp32Display;

        let i2c = I2cDriver::new(
            peripherals.i2c0,
            pins.gpio8, // SDA
            pins.gpio9, // SCL
            &I2cConfig::new().baudrate(400.kHz().into()),
        )?;
        log::info!("display ready (GPIO8/9 I2C)");
        Esp32Display::new(i2c)
    };

    #[cfg(not(feature = "display"))]
    let display = smart_pot::hal::LogDisplay::new();

    // =========================================================================
    // Controller
    // =========================================================================
    let clock = Esp32Clock::new();
    let mut controller = PlantController::new(&STATE, io, stepper, display, &config);
    controller
        .start(clock.now_ms())
        .map_err(|e| anyhow::anyhow!("startup failed: {}", e))?;

    let mut ticker = Ticker::new(config.control_loop.tick_ms);
    log::info!("control loop every {} ms", ticker.period_ms());

    // =========================================================================
    // Main Loop
    // =========================================================================
    loop {
        let now = clock.now_ms();

        if ticker.is_due(now) {
            if let Err(e) = button.rearm() {
                log::warn!("mode button interrupt not re-enabled: {:?}", e);
            }

            match controller.tick(now) {
                Ok(report) => log::trace!("{:?}", report),
                Err(e) => log::warn!("tick failed ({}): {}", e.source_name(), e),
            }
            ticker.advance(now);
        }

        // Sleep until next tick
        let wait = ticker.remaining_ms(clock.now_ms()).max(1);
        thread::sleep(Duration::from_millis(wait));
    }
}
