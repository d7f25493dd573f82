//! Automatic/manual operating mode, toggled by the mode button.
//!
//! The mode button is edge-triggered: every qualifying edge flips the mode.
//! The flip happens in interrupt context through [`ModeCell::on_mode_button_edge`];
//! the main loop only ever reads it. No debouncing is modeled beyond the
//! edge trigger itself, so electrical bounce can produce extra toggles.
//!
//! # Example
//!
//! ```rust
//! use smart_pot::mode::{Mode, ModeCell};
//!
//! let cell = ModeCell::new();
//! assert_eq!(cell.current_mode(), Mode::Automatic);
//!
//! cell.on_mode_button_edge();
//! assert_eq!(cell.current_mode(), Mode::Manual);
//!
//! cell.on_mode_button_edge();
//! assert_eq!(cell.current_mode(), Mode::Automatic);
//! ```

use core::sync::atomic::{AtomicBool, Ordering};

/// Operating mode of the controller.
///
/// # Default
///
/// Defaults to [`Automatic`](Self::Automatic), matching power-on behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Mode {
    /// Pump and tracking motor are driven by the policies.
    #[default]
    Automatic,
    /// Policies are suspended; outputs keep their last state.
    Manual,
}

impl Mode {
    /// Returns the mode as shown on the status display.
    ///
    /// # Examples
    ///
    /// ```
    /// use smart_pot::Mode;
    ///
    /// assert_eq!(Mode::Automatic.label(), "AUTO");
    /// assert_eq!(Mode::Manual.label(), "MANUAL");
    /// ```
    #[inline]
    pub const fn label(&self) -> &'static str {
        match self {
            Mode::Automatic => "AUTO",
            Mode::Manual => "MANUAL",
        }
    }

    /// Returns the other mode.
    #[inline]
    pub const fn toggled(self) -> Self {
        match self {
            Mode::Automatic => Mode::Manual,
            Mode::Manual => Mode::Automatic,
        }
    }

    /// Returns `true` in automatic mode.
    #[inline]
    pub const fn is_automatic(&self) -> bool {
        matches!(self, Mode::Automatic)
    }
}

/// Shared mode flag written from the button-edge handler.
#[derive(Debug)]
pub struct ModeCell {
    manual: AtomicBool,
}

impl ModeCell {
    /// Creates a cell in automatic mode.
    pub const fn new() -> Self {
        Self {
            manual: AtomicBool::new(false),
        }
    }

    /// Button-edge handler. Safe to call from interrupt context.
    ///
    /// Flips the mode and returns the new one.
    pub fn on_mode_button_edge(&self) -> Mode {
        let was_manual = self.manual.fetch_xor(true, Ordering::AcqRel);
        Self::from_flag(!was_manual)
    }

    /// Returns the current mode.
    #[inline]
    pub fn current_mode(&self) -> Mode {
        Self::from_flag(self.manual.load(Ordering::Acquire))
    }

    #[inline]
    fn from_flag(manual: bool) -> Mode {
        if manual {
            Mode::Manual
        } else {
            Mode::Automatic
        }
    }
}

impl Default for ModeCell {
    fn default() -> Self {
        Self::new()
    }
}
