//! Controller configuration.
//!
//! Uses `heapless::String` for `no_std` compatibility while remaining
//! ergonomic to use on desktop with `std`. All values are fixed for the
//! lifetime of a run; nothing is persisted.
//!
//! # Example
//!
//! ```rust
//! use smart_pot::config::{Config, ThresholdConfig, TrackingConfig};
//!
//! // Use defaults (calibrated for a resistive probe on a 10-bit ADC)
//! let config = Config::default();
//! assert_eq!(config.thresholds.min_moisture, 300);
//!
//! // Or customize
//! let config = Config::default()
//!     .with_thresholds(ThresholdConfig::default().with_range(1200, 3200))
//!     .with_tracking(TrackingConfig::default().with_step_magnitude(25));
//! ```

use heapless::String as HString;

use crate::irrigation::IrrigationPolicy;
use crate::status::StatusReporter;
use crate::tracking::TrackingPolicy;

/// Maximum length for short config strings (device names)
pub const MAX_SHORT_STRING: usize = 32;

/// Type alias for short config strings
pub type ShortString = HString<MAX_SHORT_STRING>;

/// Create a ShortString from a &str, truncating if too long
pub fn short_string(s: &str) -> ShortString {
    let mut hs = ShortString::new();
    let take = s.len().min(MAX_SHORT_STRING);
    // Find valid UTF-8 boundary
    let valid_end = s
        .char_indices()
        .take_while(|(i, c)| i + c.len_utf8() <= take)
        .last()
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let _ = hs.push_str(&s[..valid_end]);
    hs
}

// ============================================================================
// Main Config
// ============================================================================

/// Complete application configuration
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Moisture calibration and watering threshold
    pub thresholds: ThresholdConfig,
    /// Moisture sampling cadence
    pub sampling: SamplingConfig,
    /// Light tracking parameters
    pub tracking: TrackingConfig,
    /// Main loop pacing
    pub control_loop: LoopConfig,
    /// Device identification
    pub device: DeviceConfig,
}

impl Config {
    /// Set threshold configuration
    pub fn with_thresholds(mut self, thresholds: ThresholdConfig) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Set sampling configuration
    pub fn with_sampling(mut self, sampling: SamplingConfig) -> Self {
        self.sampling = sampling;
        self
    }

    /// Set tracking configuration
    pub fn with_tracking(mut self, tracking: TrackingConfig) -> Self {
        self.tracking = tracking;
        self
    }

    /// Set loop configuration
    pub fn with_loop(mut self, control_loop: LoopConfig) -> Self {
        self.control_loop = control_loop;
        self
    }

    /// Set device configuration
    pub fn with_device(mut self, device: DeviceConfig) -> Self {
        self.device = device;
        self
    }

    /// Irrigation policy described by this configuration
    pub fn irrigation_policy(&self) -> IrrigationPolicy {
        let policy = IrrigationPolicy::new(self.thresholds.min_moisture);
        match self.sampling.max_sample_age_ms {
            Some(age) => policy.with_max_sample_age(age),
            None => policy,
        }
    }

    /// Tracking policy described by this configuration
    pub fn tracking_policy(&self) -> TrackingPolicy {
        TrackingPolicy::new(
            self.tracking.light_diff_threshold,
            self.tracking.step_magnitude,
        )
    }

    /// Status reporter described by this configuration
    pub fn status_reporter(&self) -> StatusReporter {
        StatusReporter::new(self.thresholds.min_moisture, self.thresholds.max_moisture)
            .with_clamping(self.thresholds.clamp_percentage)
    }
}

// ============================================================================
// Threshold Config
// ============================================================================

/// Moisture calibration bounds
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThresholdConfig {
    /// Reading that maps to 0%; below this the soil is too dry
    pub min_moisture: u16,
    /// Reading that maps to 100%
    pub max_moisture: u16,
    /// Clamp the displayed percentage to 0..=100
    pub clamp_percentage: bool,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            min_moisture: 300,
            max_moisture: 800,
            clamp_percentage: false,
        }
    }
}

impl ThresholdConfig {
    /// Set the calibration range
    pub fn with_range(mut self, min: u16, max: u16) -> Self {
        self.min_moisture = min;
        self.max_moisture = max;
        self
    }

    /// Set percentage clamping
    pub fn with_clamp_percentage(mut self, clamp: bool) -> Self {
        self.clamp_percentage = clamp;
        self
    }
}

// ============================================================================
// Sampling Config
// ============================================================================

/// Moisture sampling configuration
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SamplingConfig {
    /// Minimum time between conversion requests in milliseconds
    pub period_ms: u32,
    /// Refuse to water on samples older than this (None = no limit)
    pub max_sample_age_ms: Option<u32>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            period_ms: 1000,
            max_sample_age_ms: None,
        }
    }
}

impl SamplingConfig {
    /// Set the sampling period
    pub fn with_period_ms(mut self, ms: u32) -> Self {
        self.period_ms = ms;
        self
    }

    /// Set the maximum sample age for watering decisions
    pub fn with_max_sample_age_ms(mut self, ms: u32) -> Self {
        self.max_sample_age_ms = Some(ms);
        self
    }
}

// ============================================================================
// Tracking Config
// ============================================================================

/// Light tracking and stepper configuration
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackingConfig {
    /// Largest light difference that causes no movement
    pub light_diff_threshold: u16,
    /// Motor steps per correction
    pub step_magnitude: u16,
    /// Stepper idle speed in RPM
    pub motor_rpm: u32,
    /// Stepper steps per output shaft revolution
    pub steps_per_revolution: u32,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            light_diff_threshold: 100,
            step_magnitude: 50,
            motor_rpm: 10,
            steps_per_revolution: 2048,
        }
    }
}

impl TrackingConfig {
    /// Set the dead-band threshold
    pub fn with_light_diff_threshold(mut self, threshold: u16) -> Self {
        self.light_diff_threshold = threshold;
        self
    }

    /// Set the steps per correction
    pub fn with_step_magnitude(mut self, steps: u16) -> Self {
        self.step_magnitude = steps;
        self
    }

    /// Set the motor speed
    pub fn with_motor_rpm(mut self, rpm: u32) -> Self {
        self.motor_rpm = rpm;
        self
    }
}

// ============================================================================
// Loop Config
// ============================================================================

/// Main loop configuration
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoopConfig {
    /// Tick period in milliseconds
    pub tick_ms: u32,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self { tick_ms: 100 }
    }
}

impl LoopConfig {
    /// Set the tick period
    pub fn with_tick_ms(mut self, ms: u32) -> Self {
        self.tick_ms = ms.max(1);
        self
    }
}

// ============================================================================
// Device Config
// ============================================================================

/// Device identification configuration
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceConfig {
    /// Human-readable device name, shown on the startup screen
    pub name: ShortString,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            name: short_string("SmartPot"),
        }
    }
}

impl DeviceConfig {
    /// Set the device name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = short_string(name);
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
