//! Sensor inputs and switched outputs for the ESP32-S3 pot.
//!
//! # Wiring
//!
//! - Moisture probe → GPIO1 (ADC1)
//! - Left / right photoresistor dividers → GPIO2 / GPIO3 (ADC1)
//! - Reservoir float switch → GPIO4 to GND
//! - Pump relay → GPIO5, buzzer → GPIO6
//! - Green mode LED → GPIO7, red fault LED → GPIO15
//!
//! # Moisture Conversions
//!
//! The oneshot ADC driver has no completion interrupt, so a conversion is
//! run to completion inside [`start_moisture_conversion`] and the result is
//! handed to the shared state's completion handler before returning. The
//! controller sees the same request / completion protocol either way.
//!
//! [`start_moisture_conversion`]: crate::traits::PlantIo::start_moisture_conversion

use esp_idf_hal::adc::attenuation::DB_11;
use esp_idf_hal::adc::oneshot::config::AdcChannelConfig;
use esp_idf_hal::adc::oneshot::{AdcChannelDriver, AdcDriver};
use esp_idf_hal::adc::ADC1;
use esp_idf_hal::gpio::{AnyOutputPin, Gpio1, Gpio2, Gpio3, Gpio4, Input, Output, PinDriver, Pull};
use esp_idf_hal::peripheral::Peripheral;
use esp_idf_hal::sys::EspError;

use crate::state::SystemState;
use crate::traits::{LightSide, OutputLine, PlantIo};

type Adc1Channel<'d, P> = AdcChannelDriver<'d, P, &'d AdcDriver<'d, ADC1>>;

/// ESP32 implementation of [`PlantIo`].
pub struct Esp32Io<'d> {
    state: &'static SystemState,
    moisture: Adc1Channel<'d, Gpio1>,
    light_left: Adc1Channel<'d, Gpio2>,
    light_right: Adc1Channel<'d, Gpio3>,
    reservoir: PinDriver<'d, Gpio4, Input>,
    /// Indexed by [`OutputLine::index`]
    outputs: [PinDriver<'d, AnyOutputPin, Output>; 4],
}

impl<'d> Esp32Io<'d> {
    /// Configures the sensor channels and output lines.
    ///
    /// # Arguments
    ///
    /// * `state` - Shared state that receives completed moisture samples
    /// * `adc` - ADC1 driver (must outlive this struct)
    /// * `outputs` - Pump, buzzer, mode LED, fault LED, in that order
    ///
    /// All outputs start low.
    ///
    /// # Errors
    ///
    /// Returns an error if any channel or pin fails to configure.
    pub fn new(
        state: &'static SystemState,
        adc: &'d AdcDriver<'d, ADC1>,
        moisture_pin: impl Peripheral<P = Gpio1> + 'd,
        light_left_pin: impl Peripheral<P = Gpio2> + 'd,
        light_right_pin: impl Peripheral<P = Gpio3> + 'd,
        reservoir_pin: impl Peripheral<P = Gpio4> + 'd,
        outputs: [AnyOutputPin; 4],
    ) -> Result<Self, EspError> {
        let config = AdcChannelConfig {
            attenuation: DB_11,
            ..Default::default()
        };

        let mut reservoir = PinDriver::input(reservoir_pin)?;
        reservoir.set_pull(Pull::Up)?;

        let [pump, buzzer, mode_led, fault_led] = outputs;
        let mut outputs = [
            PinDriver::output(pump)?,
            PinDriver::output(buzzer)?,
            PinDriver::output(mode_led)?,
            PinDriver::output(fault_led)?,
        ];
        for pin in &mut outputs {
            pin.set_low()?;
        }

        Ok(Self {
            state,
            moisture: AdcChannelDriver::new(adc, moisture_pin, &config)?,
            light_left: AdcChannelDriver::new(adc, light_left_pin, &config)?,
            light_right: AdcChannelDriver::new(adc, light_right_pin, &config)?,
            reservoir,
            outputs,
        })
    }
}

impl PlantIo for Esp32Io<'_> {
    type Error = EspError;

    fn start_moisture_conversion(&mut self) -> Result<(), EspError> {
        let raw = self.moisture.read()?;
        self.state.on_sample_ready(raw);
        Ok(())
    }

    fn read_light(&mut self, side: LightSide) -> Result<u16, EspError> {
        match side {
            LightSide::Left => self.light_left.read(),
            LightSide::Right => self.light_right.read(),
        }
    }

    fn reservoir_has_water(&mut self) -> Result<bool, EspError> {
        // Float switch pulls the line low when the tank is dry
        Ok(self.reservoir.is_high())
    }

    fn set_output(&mut self, line: OutputLine, on: bool) -> Result<(), EspError> {
        let pin = &mut self.outputs[line.index()];
        if on {
            pin.set_high()
        } else {
            pin.set_low()
        }
    }
}
