//! # smart-pot
//!
//! An autonomous plant-care controller: waters the soil when it dries out,
//! turns the pot toward the light, and shows its state on a small display.
//!
//! ## Features
//!
//! - **Interrupt-driven sampling**: Moisture conversions complete in interrupt context
//! - **Manual override**: A button toggles automatic control on and off
//! - **Dry-run protection**: The pump never runs with an empty reservoir
//! - **Light tracking**: A stepper motor rotates the pot toward the brighter side
//! - **Status reporting**: Moisture percentage, mode, and reservoir state on a 16x2 layout
//!
//! ## Architecture
//!
//! The crate is structured to allow testing on desktop without hardware:
//!
//! - `traits` - Hardware abstractions (sensors, outputs, motor, display, clock)
//! - `state` - Interrupt-shared moisture reading and mode flag
//! - `sampling` - Conversion pacing and sample freshness
//! - `irrigation` / `tracking` - Pure decision policies
//! - `status` - Display lines and indicator state
//! - `controller` - Main loop body that ties everything together
//! - `hal` - Concrete implementations (mock for testing, esp32 for hardware)
//!
//! ## Example
//!
//! ```rust
//! use smart_pot::{Config, PlantController, PumpCommand, SystemState};
//! use smart_pot::hal::{MockActuator, MockDisplay, MockIo};
//!
//! static STATE: SystemState = SystemState::new();
//!
//! let io = MockIo::new().with_moisture(120).with_light(500, 520);
//! let mut controller = PlantController::new(
//!     &STATE,
//!     io,
//!     MockActuator::new(),
//!     MockDisplay::new(),
//!     &Config::default(),
//! );
//! controller.start(0).unwrap();
//!
//! // The conversion-complete interrupt delivers the reading
//! controller.io_mut().complete_conversion(&STATE.moisture);
//!
//! // Update in your main loop
//! let report = controller.tick(100).unwrap();
//! assert_eq!(report.pump, Some(PumpCommand::On));
//! assert_eq!(controller.display().bottom(), Some("AUTO   OK"));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

/// Shared configuration system for desktop and ESP32.
pub mod config;
/// Main plant controller that coordinates sampling, policies, and reporting.
pub mod controller;
/// Error type for controller operations.
pub mod error;
/// Hardware abstraction layer with mock implementations for testing.
pub mod hal;
/// Pump control policy.
pub mod irrigation;
/// Operating mode and the button-edge handler.
pub mod mode;
/// Interrupt-driven moisture sampling.
pub mod sampling;
/// Deadline-based loop pacing.
pub mod schedule;
/// State shared between interrupt handlers and the main loop.
pub mod state;
/// Status lines and indicator state.
pub mod status;
/// Light-tracking policy.
pub mod tracking;
/// Core traits for hardware abstraction.
pub mod traits;

// Re-exports for convenience
pub use config::{
    Config, DeviceConfig, LoopConfig, SamplingConfig, ThresholdConfig, TrackingConfig,
};
pub use controller::{PlantController, TickError, TickReport};
pub use error::ControllerError;
pub use irrigation::{IrrigationPolicy, PumpCommand};
pub use mode::{Mode, ModeCell};
pub use sampling::{MoistureCell, SampleAge, SampleRequest, Sampler};
pub use schedule::Ticker;
pub use state::SystemState;
pub use status::{StatusLines, StatusReport, StatusReporter};
pub use tracking::{StepCommand, TrackingPolicy};
pub use traits::{
    // Hardware
    Clock,
    LightSide,
    OutputLine,
    PlantIo,
    RotaryActuator,
    // Display
    StatusDisplay,
};
