//! Light-tracking policy.
//!
//! Compares the two light sensors and rotates the pot toward the brighter
//! side by a fixed number of steps. Small differences fall inside a
//! dead-band and produce no movement, which keeps sensor noise from making
//! the motor jitter.
//!
//! There is no absolute position tracking: repeated corrections in the same
//! direction accumulate without limit.
//!
//! # Example
//!
//! ```rust
//! use smart_pot::tracking::{TrackingPolicy, StepCommand};
//!
//! let policy = TrackingPolicy::new(100, 50);
//!
//! assert_eq!(policy.evaluate(400, 550), StepCommand::Steps(50));  // brighter right
//! assert_eq!(policy.evaluate(550, 400), StepCommand::Steps(-50)); // brighter left
//! assert_eq!(policy.evaluate(400, 500), StepCommand::None);       // within dead-band
//! ```

/// Motor command issued by the tracking policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StepCommand {
    /// Leave the motor where it is.
    #[default]
    None,
    /// Move by a signed number of steps (positive = toward the right sensor).
    Steps(i32),
}

impl StepCommand {
    /// Signed step count, zero for [`StepCommand::None`].
    #[inline]
    pub const fn steps(&self) -> i32 {
        match self {
            StepCommand::None => 0,
            StepCommand::Steps(n) => *n,
        }
    }
}

/// Differential light tracking with a dead-band.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrackingPolicy {
    light_diff_threshold: u16,
    step_magnitude: u16,
}

impl TrackingPolicy {
    /// Creates a policy.
    ///
    /// * `light_diff_threshold` - largest `|right - left|` that causes no movement
    /// * `step_magnitude` - motor steps per correction
    pub const fn new(light_diff_threshold: u16, step_magnitude: u16) -> Self {
        Self {
            light_diff_threshold,
            step_magnitude,
        }
    }

    /// Dead-band half width in raw light units.
    #[inline]
    pub const fn light_diff_threshold(&self) -> u16 {
        self.light_diff_threshold
    }

    /// Motor steps per correction.
    #[inline]
    pub const fn step_magnitude(&self) -> u16 {
        self.step_magnitude
    }

    /// Decides the correction for one pair of light readings.
    pub fn evaluate(&self, left_light: u16, right_light: u16) -> StepCommand {
        let diff = i32::from(right_light) - i32::from(left_light);
        if diff.unsigned_abs() <= u32::from(self.light_diff_threshold) {
            return StepCommand::None;
        }

        let magnitude = i32::from(self.step_magnitude);
        if diff > 0 {
            StepCommand::Steps(magnitude)
        } else {
            StepCommand::Steps(-magnitude)
        }
    }
}
