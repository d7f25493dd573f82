//! Hardware abstraction traits for sensor lines, outputs, and the rotary actuator.
//!
//! This module defines the hardware interfaces the control loop needs, so that
//! smart-pot runs the same way on an ESP32 board and against desktop mocks.
//!
//! # Key Traits
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`PlantIo`] | Named digital lines, light sensors, moisture conversion trigger |
//! | [`RotaryActuator`] | Stepper that turns the pot toward the light |
//! | [`Clock`] | Time source for `no_std` environments |
//!
//! # Implementation
//!
//! For testing and desktop development, use the mock implementations
//! from [`crate::hal::mock`]. For ESP32 hardware, use the
//! implementations from `hal::esp32` (requires `esp32` feature).
//!
//! # Example
//!
//! ```rust
//! use smart_pot::traits::{PlantIo, OutputLine, LightSide};
//! use smart_pot::hal::MockIo;
//!
//! let mut io = MockIo::new().with_light(400, 550);
//! io.set_output(OutputLine::Pump, true).unwrap();
//!
//! assert!(io.output(OutputLine::Pump));
//! assert_eq!(io.read_light(LightSide::Right).unwrap(), 550);
//! ```

/// Named digital output lines driven by the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OutputLine {
    /// Water pump relay.
    Pump,
    /// Piezo buzzer. Reserved; no current policy drives it.
    Buzzer,
    /// Green LED, lit while the controller runs in automatic mode.
    ModeIndicator,
    /// Red LED, lit while the water reservoir is low.
    FaultIndicator,
}

impl OutputLine {
    /// Every output line, in wiring order.
    pub const ALL: [OutputLine; 4] = [
        OutputLine::Pump,
        OutputLine::Buzzer,
        OutputLine::ModeIndicator,
        OutputLine::FaultIndicator,
    ];

    /// Returns the line name as a lowercase string.
    ///
    /// # Examples
    ///
    /// ```
    /// use smart_pot::traits::OutputLine;
    ///
    /// assert_eq!(OutputLine::Pump.as_str(), "pump");
    /// assert_eq!(OutputLine::FaultIndicator.as_str(), "fault_led");
    /// ```
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            OutputLine::Pump => "pump",
            OutputLine::Buzzer => "buzzer",
            OutputLine::ModeIndicator => "mode_led",
            OutputLine::FaultIndicator => "fault_led",
        }
    }

    /// Index of this line in [`OutputLine::ALL`].
    #[inline]
    pub const fn index(&self) -> usize {
        match self {
            OutputLine::Pump => 0,
            OutputLine::Buzzer => 1,
            OutputLine::ModeIndicator => 2,
            OutputLine::FaultIndicator => 3,
        }
    }
}

/// Which of the two light-dependent resistors to read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LightSide {
    /// Sensor on the left side of the pot.
    Left,
    /// Sensor on the right side of the pot.
    Right,
}

/// Sensor and output lines of the plant controller board.
///
/// Groups the named boolean inputs/outputs and the analog channels the
/// control loop uses. The moisture channel is special: it is converted
/// asynchronously, so this trait only *starts* a conversion. The result is
/// delivered to [`MoistureCell::on_sample_ready`] by the hardware's completion
/// mechanism, which may be an ADC interrupt or a one-shot read that finishes
/// before the call returns.
///
/// # Implementation Notes
///
/// - `reservoir_has_water()` returns `true` when water is present, regardless
///   of the sensor's electrical polarity
/// - `set_output()` must be idempotent; the loop re-asserts outputs every tick
/// - Light readings are raw ADC units; only their difference matters
///
/// [`MoistureCell::on_sample_ready`]: crate::sampling::MoistureCell::on_sample_ready
pub trait PlantIo {
    /// Error type for I/O operations.
    type Error;

    /// Starts a moisture conversion. Must not block on the result.
    fn start_moisture_conversion(&mut self) -> Result<(), Self::Error>;

    /// Reads one of the light sensors synchronously.
    fn read_light(&mut self, side: LightSide) -> Result<u16, Self::Error>;

    /// Returns `true` if the water reservoir sensor reports water present.
    fn reservoir_has_water(&mut self) -> Result<bool, Self::Error>;

    /// Drives a named output line.
    fn set_output(&mut self, line: OutputLine, on: bool) -> Result<(), Self::Error>;

    /// Reads both light sensors, left first.
    fn read_lights(&mut self) -> Result<(u16, u16), Self::Error> {
        let left = self.read_light(LightSide::Left)?;
        let right = self.read_light(LightSide::Right)?;
        Ok((left, right))
    }
}

/// Rotary actuator trait - abstracts the light-tracking stepper.
///
/// The controller issues relative moves only; there is no absolute position
/// or limit-stop awareness.
///
/// # Implementation Notes
///
/// - `step()` is synchronous: it returns after the motion completes
/// - Positive steps rotate toward the right-hand sensor
pub trait RotaryActuator {
    /// Error type for actuator operations.
    type Error;

    /// Sets the idle speed in revolutions per minute. Called once at startup.
    fn set_speed(&mut self, rpm: u32) -> Result<(), Self::Error>;

    /// Moves by a signed number of steps.
    fn step(&mut self, steps: i32) -> Result<(), Self::Error>;

    /// Stops holding position between moves. Called after every step command.
    ///
    /// The default does nothing, for actuators that need no holding current.
    fn release(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Time source trait for `no_std` compatibility.
///
/// Provides monotonic time in milliseconds for sampling and loop pacing.
///
/// # Example
///
/// ```rust
/// use smart_pot::traits::Clock;
/// use smart_pot::hal::MockClock;
///
/// let mut clock = MockClock::new();
/// assert_eq!(clock.now_ms(), 0);
///
/// clock.advance(100);
/// assert_eq!(clock.now_ms(), 100);
/// ```
pub trait Clock {
    /// Returns current time in milliseconds since an arbitrary epoch.
    ///
    /// Must be monotonically increasing.
    fn now_ms(&self) -> u64;
}
