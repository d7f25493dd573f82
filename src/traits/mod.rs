//! Trait definitions for hardware abstraction and display output.
//!
//! This module defines the core abstractions that allow smart-pot to run on
//! different hardware (ESP32, desktop mock) without touching the control
//! policies.
//!
//! # Submodules
//!
//! - `hardware`: Sensor/output lines, rotary actuator, clock
//! - `display`: Status display trait
//!
//! # Hardware Abstraction
//!
//! - [`PlantIo`]: Reservoir sensor, light sensors, moisture conversion, outputs
//! - [`RotaryActuator`]: Stepper for light tracking
//! - [`StatusDisplay`]: Two-line status screen
//! - [`Clock`]: Time source for `no_std` environments

pub mod display;
pub mod hardware;

pub use display::*;
pub use hardware::*;
