//! Status reporting: moisture percentage, mode, and reservoir state.
//!
//! The status screen is a 16x2 character layout:
//!
//! ```text
//! ┌────────────────┐
//! │Moist: 42%      │
//! │AUTO   OK       │
//! └────────────────┘
//! ```
//!
//! The moisture percentage maps the raw reading linearly from the
//! `[min, max]` calibration range onto `[0, 100]` using integer arithmetic.
//! The result is not clamped unless configured, so readings outside the
//! calibration range show negative or above-100 percentages.
//!
//! # Example
//!
//! ```rust
//! use smart_pot::status::StatusReporter;
//! use smart_pot::Mode;
//!
//! let reporter = StatusReporter::new(300, 800);
//! let report = reporter.report(250, Mode::Automatic, true);
//!
//! let lines = report.lines();
//! assert_eq!(lines.top.as_str(), "Moist: -10%");
//! assert_eq!(lines.bottom.as_str(), "AUTO   OK");
//! ```

use core::fmt::Write;

use heapless::String as HString;

use crate::mode::Mode;

/// Capacity of one rendered status line.
pub const LINE_CAPACITY: usize = 20;

/// Column width of the mode label, including trailing padding.
const MODE_COLUMN: usize = 7;

/// One rendered status line.
pub type StatusLine = HString<LINE_CAPACITY>;

/// Maps a raw moisture reading onto a percentage of the calibration range.
///
/// Integer linear interpolation, truncating toward zero. Out-of-range readings
/// produce out-of-range percentages. A degenerate range (`min == max`) maps
/// everything to 0.
///
/// # Examples
///
/// ```
/// use smart_pot::status::moisture_percent;
///
/// assert_eq!(moisture_percent(300, 300, 800), 0);
/// assert_eq!(moisture_percent(550, 300, 800), 50);
/// assert_eq!(moisture_percent(800, 300, 800), 100);
/// assert_eq!(moisture_percent(250, 300, 800), -10);
/// ```
pub fn moisture_percent(reading: u16, min_moisture: u16, max_moisture: u16) -> i32 {
    let span = i32::from(max_moisture) - i32::from(min_moisture);
    if span == 0 {
        return 0;
    }
    (i32::from(reading) - i32::from(min_moisture)) * 100 / span
}

/// Snapshot of everything the status screen and indicators show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusReport {
    /// Moisture as a percentage of the calibration range.
    pub moisture_percent: i32,
    /// Current operating mode.
    pub mode: Mode,
    /// Whether the reservoir sensor reports water.
    pub reservoir_ok: bool,
}

impl StatusReport {
    /// Level of the mode indicator: lit in automatic mode.
    #[inline]
    pub const fn mode_indicator(&self) -> bool {
        self.mode.is_automatic()
    }

    /// Level of the fault indicator: lit while the reservoir is low.
    #[inline]
    pub const fn fault_indicator(&self) -> bool {
        !self.reservoir_ok
    }

    /// Reservoir label shown on the second line.
    #[inline]
    pub const fn reservoir_label(&self) -> &'static str {
        if self.reservoir_ok {
            "OK"
        } else {
            "LOW"
        }
    }

    /// Renders the two display lines.
    pub fn lines(&self) -> StatusLines {
        let mut top = StatusLine::new();
        let _ = write!(top, "Moist: {}%", self.moisture_percent);

        let mut bottom = StatusLine::new();
        let _ = write!(
            bottom,
            "{:<width$}{}",
            self.mode.label(),
            self.reservoir_label(),
            width = MODE_COLUMN
        );

        StatusLines { top, bottom }
    }
}

/// Full two-line text buffer for the display.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusLines {
    /// First line: moisture percentage.
    pub top: StatusLine,
    /// Second line: mode and reservoir state.
    pub bottom: StatusLine,
}

/// Builds [`StatusReport`]s from raw state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusReporter {
    min_moisture: u16,
    max_moisture: u16,
    clamp_percentage: bool,
}

impl StatusReporter {
    /// Creates a reporter for the given calibration range.
    pub const fn new(min_moisture: u16, max_moisture: u16) -> Self {
        Self {
            min_moisture,
            max_moisture,
            clamp_percentage: false,
        }
    }

    /// Clamps displayed percentages to `0..=100`.
    pub const fn with_clamping(mut self, clamp: bool) -> Self {
        self.clamp_percentage = clamp;
        self
    }

    /// Builds the report for the current state.
    pub fn report(&self, moisture_reading: u16, mode: Mode, reservoir_ok: bool) -> StatusReport {
        let mut pct = moisture_percent(moisture_reading, self.min_moisture, self.max_moisture);
        if self.clamp_percentage {
            pct = pct.clamp(0, 100);
        }
        StatusReport {
            moisture_percent: pct,
            mode,
            reservoir_ok,
        }
    }
}
