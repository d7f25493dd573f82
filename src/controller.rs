//! Main plant controller that ties sampling, policies, and reporting together.
//!
//! This module provides [`PlantController`], the body of the cooperative main
//! loop. Each call to [`tick`](PlantController::tick):
//!
//! 1. Requests a new moisture conversion if the sampling period elapsed
//! 2. In automatic mode, applies the irrigation and tracking policies
//! 3. Always re-renders the status display and indicator LEDs
//!
//! Pacing between ticks is the caller's job (see [`crate::schedule::Ticker`]).
//!
//! # Example
//!
//! ```rust
//! use smart_pot::{Config, PlantController, SystemState};
//! use smart_pot::hal::{MockActuator, MockDisplay, MockIo};
//! use smart_pot::traits::OutputLine;
//!
//! let state = SystemState::new();
//! let io = MockIo::new().with_water(true).with_light(500, 500);
//! let mut controller = PlantController::new(
//!     &state,
//!     io,
//!     MockActuator::new(),
//!     MockDisplay::new(),
//!     &Config::default(),
//! );
//!
//! controller.start(0).unwrap();
//! state.on_sample_ready(250); // conversion-complete interrupt
//!
//! controller.tick(100).unwrap();
//! assert!(controller.io().output(OutputLine::Pump));
//! assert_eq!(controller.display().top(), Some("Moist: -10%"));
//! ```
//!
//! # Manual Mode
//!
//! While the mode button has switched the controller to manual, neither
//! policy runs. The pump relay and the motor keep whatever state the last
//! automatic tick left them in.

use crate::config::Config;
use crate::error::ControllerError;
use crate::irrigation::{IrrigationPolicy, PumpCommand};
use crate::mode::Mode;
use crate::sampling::{SampleAge, SampleRequest, Sampler};
use crate::state::SystemState;
use crate::status::{StatusReport, StatusReporter};
use crate::tracking::{StepCommand, TrackingPolicy};
use crate::traits::{OutputLine, PlantIo, RotaryActuator, StatusDisplay};

/// Error returned by [`PlantController`] operations.
pub type TickError<I, A, D> = ControllerError<
    <I as PlantIo>::Error,
    <A as RotaryActuator>::Error,
    <D as StatusDisplay>::Error,
>;

/// Plant-care controller.
///
/// # Type Parameters
///
/// - `I`: Sensor and output lines ([`PlantIo`])
/// - `A`: Light-tracking actuator ([`RotaryActuator`])
/// - `D`: Status display ([`StatusDisplay`])
///
/// # Shared State
///
/// The controller reads mode and moisture from a [`SystemState`] that the
/// interrupt handlers write. It never writes either value itself.
pub struct PlantController<'s, I: PlantIo, A: RotaryActuator, D: StatusDisplay> {
    state: &'s SystemState,
    io: I,
    actuator: A,
    display: D,
    sampler: Sampler,
    sample_age: SampleAge,
    irrigation: IrrigationPolicy,
    tracking: TrackingPolicy,
    reporter: StatusReporter,
    motor_rpm: u32,
    device_name: crate::config::ShortString,
    pump: PumpCommand,
    position_steps: i64,
    last_mode: Option<Mode>,
    stale_gated: bool,
}

impl<'s, I: PlantIo, A: RotaryActuator, D: StatusDisplay> PlantController<'s, I, A, D> {
    /// Create a new controller from hardware and configuration
    pub fn new(state: &'s SystemState, io: I, actuator: A, display: D, config: &Config) -> Self {
        Self {
            state,
            io,
            actuator,
            display,
            sampler: Sampler::new(config.sampling.period_ms),
            sample_age: SampleAge::new(),
            irrigation: config.irrigation_policy(),
            tracking: config.tracking_policy(),
            reporter: config.status_reporter(),
            motor_rpm: config.tracking.motor_rpm,
            device_name: config.device.name.clone(),
            pump: PumpCommand::Off,
            position_steps: 0,
            last_mode: None,
            stale_gated: false,
        }
    }

    /// One-time startup: display banner, motor speed, outputs off, first sample.
    pub fn start(&mut self, now_ms: u64) -> Result<(), TickError<I, A, D>> {
        self.display.init().map_err(ControllerError::Display)?;
        self.display
            .show_message(self.device_name.as_str(), Some("Starting..."))
            .map_err(ControllerError::Display)?;

        self.actuator
            .set_speed(self.motor_rpm)
            .map_err(ControllerError::Actuator)?;

        for line in OutputLine::ALL {
            self.io.set_output(line, false).map_err(ControllerError::Io)?;
        }
        self.pump = PumpCommand::Off;

        self.sampler
            .request_now(&self.state.moisture, &mut self.io, now_ms)
            .map_err(ControllerError::Io)?;

        log::info!(
            "{} started: {} rpm, sampling every {} ms",
            self.device_name,
            self.motor_rpm,
            self.sampler.period_ms()
        );
        Ok(())
    }

    /// Run one main-loop iteration
    pub fn tick(&mut self, now_ms: u64) -> Result<TickReport, TickError<I, A, D>> {
        let sample = match self.sampler.poll(&self.state.moisture, &mut self.io, now_ms) {
            Ok(sample) => sample,
            Err(_) => {
                log::warn!("moisture conversion failed to start, keeping last reading");
                SampleRequest::Failed
            }
        };
        self.sample_age.observe(&self.state.moisture, now_ms);

        let mode = self.state.current_mode();
        if self.last_mode != Some(mode) {
            log::info!("mode: {}", mode.label());
            self.last_mode = Some(mode);
        }

        let reading = self.state.moisture_reading();
        let has_water = self.io.reservoir_has_water().map_err(ControllerError::Io)?;

        let (pump, step) = if mode.is_automatic() {
            let pump = self.apply_irrigation(reading, has_water, now_ms)?;
            let step = self.apply_tracking()?;
            (Some(pump), Some(step))
        } else {
            (None, None)
        };

        let status = self.reporter.report(reading, mode, has_water);
        self.publish_status(&status)?;

        Ok(TickReport {
            sample,
            mode,
            pump,
            step,
            status,
        })
    }

    fn apply_irrigation(
        &mut self,
        reading: u16,
        has_water: bool,
        now_ms: u64,
    ) -> Result<PumpCommand, TickError<I, A, D>> {
        let age = self.sample_age.age_ms(now_ms);
        let command = self.irrigation.evaluate_aged(reading, has_water, age);

        self.io
            .set_output(OutputLine::Pump, command.is_on())
            .map_err(ControllerError::Io)?;

        if command != self.pump {
            log::info!(
                "pump {:?} (moisture {}, reservoir {})",
                command,
                reading,
                if has_water { "ok" } else { "low" }
            );
        }
        let gated = command != self.irrigation.evaluate(reading, has_water);
        if gated && !self.stale_gated {
            log::warn!("moisture sample too old to water on (age {:?} ms)", age);
        }
        self.stale_gated = gated;
        self.pump = command;
        Ok(command)
    }

    fn apply_tracking(&mut self) -> Result<StepCommand, TickError<I, A, D>> {
        let (left, right) = self.io.read_lights().map_err(ControllerError::Io)?;
        let command = self.tracking.evaluate(left, right);

        if let StepCommand::Steps(steps) = command {
            self.actuator.step(steps).map_err(ControllerError::Actuator)?;
            self.actuator.release().map_err(ControllerError::Actuator)?;
            self.position_steps += i64::from(steps);
            log::debug!(
                "track {:+} steps (left {}, right {}, position {})",
                steps,
                left,
                right,
                self.position_steps
            );
        }
        Ok(command)
    }

    fn publish_status(&mut self, status: &StatusReport) -> Result<(), TickError<I, A, D>> {
        self.display
            .render(&status.lines())
            .map_err(ControllerError::Display)?;
        self.io
            .set_output(OutputLine::ModeIndicator, status.mode_indicator())
            .map_err(ControllerError::Io)?;
        self.io
            .set_output(OutputLine::FaultIndicator, status.fault_indicator())
            .map_err(ControllerError::Io)?;
        Ok(())
    }

    /// Last pump command issued by the irrigation policy
    pub fn pump_command(&self) -> PumpCommand {
        self.pump
    }

    /// Returns `true` while watering is held off because the sample is too old.
    pub fn is_stale_gated(&self) -> bool {
        self.stale_gated
    }

    /// Net steps issued to the actuator since startup.
    ///
    /// Informational only; the actuator has no absolute reference.
    pub fn position_steps(&self) -> i64 {
        self.position_steps
    }

    /// Current operating mode
    pub fn current_mode(&self) -> Mode {
        self.state.current_mode()
    }

    /// Milliseconds since the current moisture sample was first seen
    pub fn sample_age_ms(&self, now_ms: u64) -> Option<u64> {
        self.sample_age.age_ms(now_ms)
    }

    /// Sensor and output lines
    pub fn io(&self) -> &I {
        &self.io
    }

    /// Mutable access to sensor and output lines
    pub fn io_mut(&mut self) -> &mut I {
        &mut self.io
    }

    /// Light-tracking actuator
    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    /// Status display
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Mutable access to the status display
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }
}

/// What a single [`PlantController::tick`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickReport {
    /// Outcome of the moisture sample request.
    pub sample: SampleRequest,
    /// Mode the tick ran in.
    pub mode: Mode,
    /// Pump command, if the irrigation policy ran.
    pub pump: Option<PumpCommand>,
    /// Motor command, if the tracking policy ran.
    pub step: Option<StepCommand>,
    /// Status shown on the display and indicators.
    pub status: StatusReport,
}

impl TickReport {
    /// Returns `true` if the policies were evaluated this tick.
    pub fn policies_ran(&self) -> bool {
        self.pump.is_some()
    }
}
