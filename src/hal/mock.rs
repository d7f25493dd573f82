//! Mock implementations for testing without hardware.
//!
//! This module provides test doubles for all hardware traits, enabling
//! development and testing on desktop without a board.
//!
//! # Available Mocks
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockIo`] | [`PlantIo`] | Settable sensors, recorded outputs and conversions |
//! | [`MockActuator`] | [`RotaryActuator`] | Records every move |
//! | [`MockDisplay`] | [`StatusDisplay`] | Keeps the last rendered lines |
//! | [`MockClock`] | [`Clock`] | Controllable time source |
//!
//! # Example
//!
//! ```rust
//! use smart_pot::{Config, PlantController, SystemState};
//! use smart_pot::hal::{MockActuator, MockDisplay, MockIo};
//!
//! let state = SystemState::new();
//! let io = MockIo::new().with_moisture(700).with_light(300, 500);
//! let mut controller = PlantController::new(
//!     &state,
//!     io,
//!     MockActuator::new(),
//!     MockDisplay::new(),
//!     &Config::default(),
//! );
//! controller.start(0).unwrap();
//!
//! // Deliver the pending conversion as the ADC interrupt would
//! controller.io_mut().complete_conversion(&state.moisture);
//! controller.tick(100).unwrap();
//!
//! assert_eq!(controller.actuator().moves, vec![50]);
//! assert_eq!(controller.display().top(), Some("Moist: 80%"));
//! ```
//!
//! [`PlantIo`]: crate::traits::PlantIo
//! [`RotaryActuator`]: crate::traits::RotaryActuator
//! [`StatusDisplay`]: crate::traits::StatusDisplay
//! [`Clock`]: crate::traits::Clock

extern crate alloc;
use alloc::string::String;
use alloc::vec::Vec;

use crate::sampling::MoistureCell;
use crate::status::StatusLines;
use crate::traits::{Clock, LightSide, OutputLine, PlantIo, RotaryActuator, StatusDisplay};

// ============================================================================
// Hardware Mocks
// ============================================================================

/// Mock sensor and output lines.
///
/// The moisture "sensor" value is only delivered to the shared state when
/// the test calls [`complete_conversion`](Self::complete_conversion), which
/// stands in for the ADC interrupt.
///
/// # Example
///
/// ```rust
/// use smart_pot::hal::MockIo;
/// use smart_pot::sampling::MoistureCell;
/// use smart_pot::traits::{PlantIo, OutputLine};
///
/// let cell = MoistureCell::new();
/// let mut io = MockIo::new().with_moisture(420);
///
/// io.start_moisture_conversion().unwrap();
/// assert!(io.complete_conversion(&cell));
/// assert_eq!(cell.reading(), 420);
///
/// // Nothing pending any more
/// assert!(!io.complete_conversion(&cell));
///
/// io.set_output(OutputLine::ModeIndicator, true).unwrap();
/// assert!(io.output(OutputLine::ModeIndicator));
/// ```
#[derive(Debug)]
pub struct MockIo {
    /// Value the moisture sensor currently sees (raw units).
    pub moisture: u16,
    /// Left light sensor value.
    pub light_left: u16,
    /// Right light sensor value.
    pub light_right: u16,
    /// Whether the reservoir sensor reports water.
    pub has_water: bool,
    /// Number of conversions started.
    pub conversions_started: usize,
    /// Number of light sensor reads.
    pub light_reads: usize,
    /// Every output write, in order.
    pub output_log: Vec<(OutputLine, bool)>,
    /// Make `start_moisture_conversion` fail.
    pub fail_conversion: bool,
    /// Make `reservoir_has_water` fail.
    pub fail_reservoir: bool,
    outputs: [bool; 4],
    pending: bool,
}

impl MockIo {
    /// Creates a mock with water present, dark sensors, and all outputs low.
    pub fn new() -> Self {
        Self {
            moisture: 0,
            light_left: 0,
            light_right: 0,
            has_water: true,
            conversions_started: 0,
            light_reads: 0,
            output_log: Vec::new(),
            fail_conversion: false,
            fail_reservoir: false,
            outputs: [false; 4],
            pending: false,
        }
    }

    /// Sets the value the moisture sensor sees.
    pub fn with_moisture(mut self, raw: u16) -> Self {
        self.moisture = raw;
        self
    }

    /// Sets both light sensor values.
    pub fn with_light(mut self, left: u16, right: u16) -> Self {
        self.light_left = left;
        self.light_right = right;
        self
    }

    /// Sets the reservoir sensor.
    pub fn with_water(mut self, has_water: bool) -> Self {
        self.has_water = has_water;
        self
    }

    /// Current level of an output line.
    pub fn output(&self, line: OutputLine) -> bool {
        self.outputs[line.index()]
    }

    /// Number of writes made to one output line.
    pub fn writes_to(&self, line: OutputLine) -> usize {
        self.output_log.iter().filter(|(l, _)| *l == line).count()
    }

    /// Returns `true` if a started conversion has not been delivered yet.
    pub fn conversion_pending(&self) -> bool {
        self.pending
    }

    /// Delivers the pending conversion to `cell`, as the ADC interrupt would.
    ///
    /// Returns `false` if no conversion was pending.
    pub fn complete_conversion(&mut self, cell: &MoistureCell) -> bool {
        if !self.pending {
            return false;
        }
        self.pending = false;
        cell.on_sample_ready(self.moisture);
        true
    }
}

impl Default for MockIo {
    fn default() -> Self {
        Self::new()
    }
}

impl PlantIo for MockIo {
    type Error = ();

    fn start_moisture_conversion(&mut self) -> Result<(), ()> {
        if self.fail_conversion {
            return Err(());
        }
        self.pending = true;
        self.conversions_started += 1;
        Ok(())
    }

    fn read_light(&mut self, side: LightSide) -> Result<u16, ()> {
        self.light_reads += 1;
        Ok(match side {
            LightSide::Left => self.light_left,
            LightSide::Right => self.light_right,
        })
    }

    fn reservoir_has_water(&mut self) -> Result<bool, ()> {
        if self.fail_reservoir {
            return Err(());
        }
        Ok(self.has_water)
    }

    fn set_output(&mut self, line: OutputLine, on: bool) -> Result<(), ()> {
        self.outputs[line.index()] = on;
        self.output_log.push((line, on));
        Ok(())
    }
}

/// Mock rotary actuator.
///
/// # Example
///
/// ```rust
/// use smart_pot::hal::MockActuator;
/// use smart_pot::traits::RotaryActuator;
///
/// let mut motor = MockActuator::new();
/// motor.set_speed(10).unwrap();
/// motor.step(50).unwrap();
/// motor.step(-20).unwrap();
///
/// assert_eq!(motor.rpm, Some(10));
/// assert_eq!(motor.moves, vec![50, -20]);
/// assert_eq!(motor.position, 30);
/// ```
#[derive(Debug, Default)]
pub struct MockActuator {
    /// Speed set via `set_speed`, if any.
    pub rpm: Option<u32>,
    /// Every step command, in order.
    pub moves: Vec<i32>,
    /// Net steps taken.
    pub position: i64,
    /// Number of `release` calls.
    pub releases: usize,
    /// Make `step` fail.
    pub fail_step: bool,
}

impl MockActuator {
    /// Creates a new mock actuator.
    pub fn new() -> Self {
        Self::default()
    }
}

impl RotaryActuator for MockActuator {
    type Error = ();

    fn set_speed(&mut self, rpm: u32) -> Result<(), ()> {
        self.rpm = Some(rpm);
        Ok(())
    }

    fn step(&mut self, steps: i32) -> Result<(), ()> {
        if self.fail_step {
            return Err(());
        }
        self.moves.push(steps);
        self.position += i64::from(steps);
        Ok(())
    }

    fn release(&mut self) -> Result<(), ()> {
        self.releases += 1;
        Ok(())
    }
}

/// Mock clock for testing.
///
/// # Example
///
/// ```rust
/// use smart_pot::hal::MockClock;
/// use smart_pot::traits::Clock;
///
/// let mut clock = MockClock::new();
/// clock.set(1000);
/// clock.advance(500);
/// assert_eq!(clock.now_ms(), 1500);
/// ```
#[derive(Debug, Default)]
pub struct MockClock {
    current_ms: u64,
}

impl MockClock {
    /// Creates a new mock clock starting at 0ms.
    pub fn new() -> Self {
        Self { current_ms: 0 }
    }

    /// Sets the current time in milliseconds.
    pub fn set(&mut self, ms: u64) {
        self.current_ms = ms;
    }

    /// Advances the clock by the given duration.
    pub fn advance(&mut self, ms: u64) {
        self.current_ms += ms;
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        self.current_ms
    }
}

// ============================================================================
// Display Mocks
// ============================================================================

/// Mock display for testing status rendering.
#[derive(Debug, Default)]
pub struct MockDisplay {
    /// The last lines that were rendered.
    pub last_lines: Option<StatusLines>,
    /// Number of times render() was called.
    pub render_count: usize,
    /// Last message shown via show_message().
    pub last_message: Option<(String, Option<String>)>,
    /// Whether init() was called.
    pub initialized: bool,
    /// Make `render` fail.
    pub fail_render: bool,
}

impl MockDisplay {
    /// Creates a new mock display.
    pub fn new() -> Self {
        Self::default()
    }

    /// Top line of the last render.
    pub fn top(&self) -> Option<&str> {
        self.last_lines.as_ref().map(|l| l.top.as_str())
    }

    /// Bottom line of the last render.
    pub fn bottom(&self) -> Option<&str> {
        self.last_lines.as_ref().map(|l| l.bottom.as_str())
    }
}

impl StatusDisplay for MockDisplay {
    type Error = ();

    fn init(&mut self) -> Result<(), ()> {
        self.initialized = true;
        Ok(())
    }

    fn render(&mut self, lines: &StatusLines) -> Result<(), ()> {
        if self.fail_render {
            return Err(());
        }
        self.last_lines = Some(lines.clone());
        self.render_count += 1;
        Ok(())
    }

    fn show_message(&mut self, line1: &str, line2: Option<&str>) -> Result<(), ()> {
        self.last_message = Some((line1.into(), line2.map(Into::into)));
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::StatusReporter;
    use crate::Mode;

    #[test]
    fn mock_io_default() {
        let io = MockIo::new();
        assert!(io.has_water);
        assert_eq!(io.conversions_started, 0);
        assert!(!io.conversion_pending());
        for line in OutputLine::ALL {
            assert!(!io.output(line));
        }
    }

    #[test]
    fn mock_io_records_outputs() {
        let mut io = MockIo::new();
        io.set_output(OutputLine::Pump, true).unwrap();
        io.set_output(OutputLine::Pump, false).unwrap();
        io.set_output(OutputLine::Buzzer, true).unwrap();

        assert!(!io.output(OutputLine::Pump));
        assert!(io.output(OutputLine::Buzzer));
        assert_eq!(io.writes_to(OutputLine::Pump), 2);
        assert_eq!(io.writes_to(OutputLine::FaultIndicator), 0);
    }

    #[test]
    fn mock_io_conversion_lifecycle() {
        let cell = MoistureCell::new();
        let mut io = MockIo::new().with_moisture(333);

        assert!(!io.complete_conversion(&cell));
        io.start_moisture_conversion().unwrap();
        assert!(io.conversion_pending());
        assert!(io.complete_conversion(&cell));
        assert_eq!(cell.reading(), 333);
        assert_eq!(cell.generation(), 1);
    }

    #[test]
    fn mock_io_failures() {
        let mut io = MockIo::new();
        io.fail_conversion = true;
        io.fail_reservoir = true;
        assert!(io.start_moisture_conversion().is_err());
        assert!(io.reservoir_has_water().is_err());
        assert_eq!(io.conversions_started, 0);
    }

    #[test]
    fn mock_actuator_failure() {
        let mut motor = MockActuator::new();
        motor.fail_step = true;
        assert!(motor.step(5).is_err());
        assert!(motor.moves.is_empty());
    }

    #[test]
    fn mock_display_render() {
        let mut display = MockDisplay::new();
        let lines = StatusReporter::new(300, 800)
            .report(550, Mode::Manual, false)
            .lines();

        display.render(&lines).unwrap();
        assert_eq!(display.render_count, 1);
        assert_eq!(display.top(), Some("Moist: 50%"));
        assert_eq!(display.bottom(), Some("MANUAL LOW"));
    }

    #[test]
    fn mock_display_show_message() {
        let mut display = MockDisplay::new();
        display.show_message("SmartPot", None).unwrap();

        let (line1, line2) = display.last_message.as_ref().unwrap();
        assert_eq!(line1, "SmartPot");
        assert!(line2.is_none());
    }

    #[test]
    fn mock_clock_advance() {
        let mut clock = MockClock::new();
        clock.advance(500);
        clock.advance(250);
        assert_eq!(clock.now_ms(), 750);
    }
}
