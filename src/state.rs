//! Process-wide controller state shared with interrupt handlers.
//!
//! [`SystemState`] bundles the two values written from interrupt context:
//! the moisture reading and the operating mode. It is `const`-constructible,
//! so firmware keeps it in a `static` that the handlers can reach, while
//! tests build a fresh one per case and pass it by reference.
//!
//! # Example
//!
//! ```rust
//! use smart_pot::{Mode, SystemState};
//!
//! static STATE: SystemState = SystemState::new();
//!
//! // Interrupt handlers
//! STATE.on_sample_ready(450);
//! STATE.on_mode_button_edge();
//!
//! // Main loop
//! assert_eq!(STATE.moisture_reading(), 450);
//! assert_eq!(STATE.current_mode(), Mode::Manual);
//! ```

use crate::mode::{Mode, ModeCell};
use crate::sampling::MoistureCell;

/// Shared state between interrupt handlers and the main loop.
///
/// Each field has exactly one writer (its interrupt handler) and is only
/// read by the main loop.
#[derive(Debug, Default)]
pub struct SystemState {
    /// Moisture reading, written by the conversion-complete handler.
    pub moisture: MoistureCell,
    /// Operating mode, written by the button-edge handler.
    pub mode: ModeCell,
}

impl SystemState {
    /// Creates the power-on state: automatic mode, reading 0.
    pub const fn new() -> Self {
        Self {
            moisture: MoistureCell::new(),
            mode: ModeCell::new(),
        }
    }

    /// Conversion-complete handler. See [`MoistureCell::on_sample_ready`].
    #[inline]
    pub fn on_sample_ready(&self, raw: u16) {
        self.moisture.on_sample_ready(raw);
    }

    /// Button-edge handler. See [`ModeCell::on_mode_button_edge`].
    #[inline]
    pub fn on_mode_button_edge(&self) -> Mode {
        self.mode.on_mode_button_edge()
    }

    /// Last completed moisture reading.
    #[inline]
    pub fn moisture_reading(&self) -> u16 {
        self.moisture.reading()
    }

    /// Current operating mode.
    #[inline]
    pub fn current_mode(&self) -> Mode {
        self.mode.current_mode()
    }
}
