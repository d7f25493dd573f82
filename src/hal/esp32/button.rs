//! Mode toggle button on a GPIO falling-edge interrupt.
//!
//! # Wiring
//!
//! - Button → GPIO0 (the DevKitC BOOT button), active low, internal pull-up
//!
//! The interrupt handler only flips the mode flag in [`SystemState`]. It is
//! not debounced: each falling edge the hardware reports is one toggle.

use esp_idf_hal::gpio::{Gpio0, Input, InterruptType, PinDriver, Pull};
use esp_idf_hal::peripheral::Peripheral;
use esp_idf_hal::sys::EspError;

use crate::state::SystemState;

/// Mode button wired to [`SystemState::on_mode_button_edge`].
///
/// ESP-IDF disables a GPIO interrupt after it fires, so call
/// [`rearm`](Self::rearm) once per loop iteration.
///
/// # Example
///
/// ```ignore
/// use smart_pot::hal::esp32::Esp32ModeButton;
/// use smart_pot::SystemState;
///
/// static STATE: SystemState = SystemState::new();
///
/// let peripherals = Peripherals::take()?;
/// let mut button = Esp32ModeButton::new(&STATE, peripherals.pins.gpio0)?;
///
/// loop {
///     button.rearm()?;
///     println!("mode: {}", STATE.current_mode().label());
/// }
/// ```
pub struct Esp32ModeButton<'d> {
    pin: PinDriver<'d, Gpio0, Input>,
}

impl<'d> Esp32ModeButton<'d> {
    /// Configures the pin and subscribes the edge handler.
    ///
    /// # Errors
    ///
    /// Returns an error if the pin or the interrupt fails to configure.
    pub fn new(
        state: &'static SystemState,
        pin: impl Peripheral<P = Gpio0> + 'd,
    ) -> Result<Self, EspError> {
        let mut pin = PinDriver::input(pin)?;
        pin.set_pull(Pull::Up)?;
        pin.set_interrupt_type(InterruptType::NegEdge)?;

        // Safe: the handler only touches atomics in a 'static
        unsafe {
            pin.subscribe(move || {
                state.on_mode_button_edge();
            })?;
        }
        pin.enable_interrupt()?;

        Ok(Self { pin })
    }

    /// Re-enables the edge interrupt after it fired.
    #[inline]
    pub fn rearm(&mut self) -> Result<(), EspError> {
        self.pin.enable_interrupt()
    }
}
