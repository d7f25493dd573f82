//! Deadline-based loop pacing.
//!
//! [`Ticker`] replaces a fixed delay at the end of each iteration with a
//! schedule of tick deadlines. The loop asks how long to wait until the next
//! deadline, so time spent moving the motor or refreshing the display is
//! absorbed instead of added on top.
//!
//! # Example
//!
//! ```rust
//! use smart_pot::schedule::Ticker;
//!
//! let mut ticker = Ticker::new(100);
//! assert!(ticker.is_due(0));
//! ticker.advance(0);
//!
//! // Iteration took 30ms: sleep the remaining 70
//! assert_eq!(ticker.remaining_ms(30), 70);
//!
//! // Iteration overran: no wait, next deadline realigned
//! assert_eq!(ticker.remaining_ms(250), 0);
//! ticker.advance(250);
//! assert_eq!(ticker.remaining_ms(250), 100);
//! ```

/// Fixed-period tick schedule.
#[derive(Clone, Debug)]
pub struct Ticker {
    period_ms: u32,
    next_deadline_ms: u64,
    ticks: u64,
}

impl Ticker {
    /// Creates a ticker whose first tick is due immediately.
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms: period_ms.max(1),
            next_deadline_ms: 0,
            ticks: 0,
        }
    }

    /// Tick period in milliseconds.
    #[inline]
    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Number of ticks taken so far.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Returns `true` if the next tick is due at `now_ms`.
    #[inline]
    pub fn is_due(&self, now_ms: u64) -> bool {
        now_ms >= self.next_deadline_ms
    }

    /// Milliseconds to wait before the next tick is due.
    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        self.next_deadline_ms.saturating_sub(now_ms)
    }

    /// Records a tick taken at `now_ms` and schedules the next one.
    ///
    /// Deadlines stay on the original grid while the loop keeps up. After an
    /// overrun the grid restarts from `now_ms`, so missed ticks are dropped
    /// rather than run back to back.
    pub fn advance(&mut self, now_ms: u64) {
        let period = u64::from(self.period_ms);
        let next = self.next_deadline_ms + period;
        self.next_deadline_ms = if next > now_ms { next } else { now_ms + period };
        self.ticks += 1;
    }
}
