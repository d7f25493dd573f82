//! Millisecond clock from the ESP-IDF high-resolution timer.

use crate::traits::Clock;

/// Time since boot from `esp_timer_get_time()`.
///
/// Never wraps in practice: the timer is 64-bit microseconds.
///
/// # Example
///
/// ```ignore
/// use smart_pot::hal::esp32::Esp32Clock;
/// use smart_pot::traits::Clock;
///
/// let clock = Esp32Clock::new();
/// let start = clock.now_ms();
/// // ... tick the controller ...
/// let elapsed = clock.now_ms() - start;
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Esp32Clock;

impl Esp32Clock {
    /// Creates a clock handle.
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl Clock for Esp32Clock {
    #[inline]
    fn now_ms(&self) -> u64 {
        // Plain read of the system timer, no side effects
        let micros = unsafe { esp_idf_hal::sys::esp_timer_get_time() };
        (micros / 1000) as u64
    }
}
