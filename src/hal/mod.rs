//! Hardware Abstraction Layer implementations.
//!
//! This module contains concrete implementations of the traits
//! defined in [`crate::traits`] for various platforms.
//!
//! # Available Implementations
//!
//! - `mock`: Test implementations for desktop development
//! - `stepper`: Four-coil stepper driver over any `embedded-hal` pins
//! - `log_display`: Status display that writes to the log
//! - `esp32`: ESP32-S3 DevKitC plant pot wiring (requires `esp32` feature)

pub mod log_display;
pub mod mock;
pub mod stepper;

#[cfg(feature = "esp32")]
pub mod esp32;

pub use log_display::LogDisplay;
pub use mock::*;
pub use stepper::{step_delay_us, CoilStepper, FULL_STEP_SEQUENCE};

#[cfg(feature = "esp32")]
pub use esp32::*;
