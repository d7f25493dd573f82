//! Pump control policy.
//!
//! The pump runs only when the soil is too dry *and* the reservoir has
//! water. The reservoir check keeps the pump from running dry.
//!
//! # Example
//!
//! ```rust
//! use smart_pot::irrigation::{IrrigationPolicy, PumpCommand};
//!
//! let policy = IrrigationPolicy::new(300);
//!
//! assert_eq!(policy.evaluate(250, true), PumpCommand::On);
//! assert_eq!(policy.evaluate(250, false), PumpCommand::Off); // reservoir empty
//! assert_eq!(policy.evaluate(300, true), PumpCommand::Off); // wet enough
//! ```

/// Desired pump relay state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PumpCommand {
    /// Relay energized.
    On,
    /// Relay released.
    #[default]
    Off,
}

impl PumpCommand {
    /// Relay level for this command.
    #[inline]
    pub const fn is_on(&self) -> bool {
        matches!(self, PumpCommand::On)
    }
}

impl From<bool> for PumpCommand {
    fn from(on: bool) -> Self {
        if on {
            PumpCommand::On
        } else {
            PumpCommand::Off
        }
    }
}

/// Moisture/reservoir gated pump policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IrrigationPolicy {
    min_moisture: u16,
    max_sample_age_ms: Option<u32>,
}

impl IrrigationPolicy {
    /// Creates a policy that waters below `min_moisture` raw units.
    pub const fn new(min_moisture: u16) -> Self {
        Self {
            min_moisture,
            max_sample_age_ms: None,
        }
    }

    /// Refuses to water on samples older than `max_age_ms`.
    pub const fn with_max_sample_age(mut self, max_age_ms: u32) -> Self {
        self.max_sample_age_ms = Some(max_age_ms);
        self
    }

    /// Lower moisture bound in raw sensor units.
    #[inline]
    pub const fn min_moisture(&self) -> u16 {
        self.min_moisture
    }

    /// Decides the pump state from the latest reading and reservoir level.
    #[inline]
    pub const fn evaluate(&self, moisture_reading: u16, reservoir_has_water: bool) -> PumpCommand {
        if moisture_reading < self.min_moisture && reservoir_has_water {
            PumpCommand::On
        } else {
            PumpCommand::Off
        }
    }

    /// Like [`evaluate`](Self::evaluate), but also gates on sample age.
    ///
    /// With no age limit configured this is identical to `evaluate`. With a
    /// limit, a sample that is missing or older than the limit yields `Off`.
    pub fn evaluate_aged(
        &self,
        moisture_reading: u16,
        reservoir_has_water: bool,
        sample_age_ms: Option<u64>,
    ) -> PumpCommand {
        if let Some(limit) = self.max_sample_age_ms {
            let fresh = matches!(sample_age_ms, Some(age) if age <= u64::from(limit));
            if !fresh {
                return PumpCommand::Off;
            }
        }
        self.evaluate(moisture_reading, reservoir_has_water)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dry_soil_with_water_turns_pump_on() {
        let policy = IrrigationPolicy::new(300);
        for reading in [0, 1, 150, 299] {
            assert_eq!(policy.evaluate(reading, true), PumpCommand::On);
        }
    }

    #[test]
    fn wet_soil_keeps_pump_off() {
        let policy = IrrigationPolicy::new(300);
        for reading in [300, 301, 800, u16::MAX] {
            assert_eq!(policy.evaluate(reading, true), PumpCommand::Off);
        }
    }

    #[test]
    fn empty_reservoir_keeps_pump_off() {
        let policy = IrrigationPolicy::new(300);
        for reading in [0, 299, 300, 1023] {
            assert_eq!(policy.evaluate(reading, false), PumpCommand::Off);
        }
    }

    #[test]
    fn age_gate_disabled_by_default() {
        let policy = IrrigationPolicy::new(300);
        assert_eq!(policy.evaluate_aged(100, true, None), PumpCommand::On);
        assert_eq!(policy.evaluate_aged(100, true, Some(u64::MAX)), PumpCommand::On);
    }

    #[test]
    fn stale_sample_blocks_watering() {
        let policy = IrrigationPolicy::new(300).with_max_sample_age(5000);
        assert_eq!(policy.evaluate_aged(100, true, Some(5000)), PumpCommand::On);
        assert_eq!(policy.evaluate_aged(100, true, Some(5001)), PumpCommand::Off);
        assert_eq!(policy.evaluate_aged(100, true, None), PumpCommand::Off);
    }

    #[test]
    fn pump_command_from_bool() {
        assert_eq!(PumpCommand::from(true), PumpCommand::On);
        assert_eq!(PumpCommand::from(false), PumpCommand::Off);
        assert!(PumpCommand::On.is_on());
        assert!(!PumpCommand::default().is_on());
    }
}
