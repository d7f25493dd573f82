//! Interrupt-driven moisture sampling.
//!
//! The moisture sensor is read through an asynchronous conversion: the main
//! loop starts a conversion, and the hardware signals completion later from
//! interrupt context. This module owns both halves:
//!
//! - [`MoistureCell`]: lock-free storage shared between the completion
//!   handler (sole writer) and the main loop (reader)
//! - [`Sampler`]: paces conversion requests to one per sampling period and
//!   refuses to overlap them
//! - [`SampleAge`]: tracks when the main loop last saw a fresh sample
//!
//! # Concurrency
//!
//! Every shared field is a single word-sized atomic. The completion handler
//! stores the reading before bumping the generation counter, both with
//! `Release` ordering. A conversion in progress never partially overwrites
//! the last reading.
//!
//! # Example
//!
//! ```rust
//! use smart_pot::sampling::{MoistureCell, Sampler, SampleRequest};
//! use smart_pot::hal::MockIo;
//!
//! let cell = MoistureCell::new();
//! let mut io = MockIo::new();
//! let mut sampler = Sampler::new(1000);
//!
//! assert_eq!(sampler.poll(&cell, &mut io, 0).unwrap(), SampleRequest::Started);
//!
//! // Completion interrupt fires
//! cell.on_sample_ready(512);
//! assert_eq!(cell.reading(), 512);
//!
//! // Not due again until the period has elapsed
//! assert_eq!(sampler.poll(&cell, &mut io, 500).unwrap(), SampleRequest::NotDue);
//! ```

use core::sync::atomic::{AtomicBool, AtomicU16, AtomicU32, Ordering};

use crate::traits::PlantIo;

/// Shared moisture reading written from the conversion-complete handler.
///
/// `const`-constructible so it can live in a `static` alongside the
/// interrupt handler that feeds it.
#[derive(Debug)]
pub struct MoistureCell {
    reading: AtomicU16,
    in_flight: AtomicBool,
    generation: AtomicU32,
}

impl MoistureCell {
    /// Creates an empty cell: reading 0, no conversion running.
    pub const fn new() -> Self {
        Self {
            reading: AtomicU16::new(0),
            in_flight: AtomicBool::new(false),
            generation: AtomicU32::new(0),
        }
    }

    /// Conversion-complete handler. Safe to call from interrupt context.
    ///
    /// Stores `raw` as the current reading and marks the conversion as
    /// finished. This is the only writer of the reading.
    pub fn on_sample_ready(&self, raw: u16) {
        self.reading.store(raw, Ordering::Release);
        self.generation.fetch_add(1, Ordering::Release);
        self.in_flight.store(false, Ordering::Release);
    }

    /// Returns the most recently completed reading, in raw sensor units.
    #[inline]
    pub fn reading(&self) -> u16 {
        self.reading.load(Ordering::Acquire)
    }

    /// Number of conversions completed since startup (wrapping).
    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation.load(Ordering::Acquire)
    }

    /// Returns `true` while a conversion has been started but not completed.
    #[inline]
    pub fn is_converting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Claims the converter. Returns `false` if a conversion is already running.
    fn begin_conversion(&self) -> bool {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Releases the converter after a start request failed.
    fn abort_conversion(&self) {
        self.in_flight.store(false, Ordering::Release);
    }
}

impl Default for MoistureCell {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of a sample request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SampleRequest {
    /// A new conversion was started.
    Started,
    /// The previous conversion has not completed; nothing was started.
    InFlight,
    /// The sampling period has not elapsed yet.
    NotDue,
    /// The hardware refused to start a conversion. The last reading stays.
    Failed,
}

/// Starts a moisture conversion unless one is already in flight.
///
/// Non-blocking. If the hardware refuses to start, the converter is released
/// again and the error is returned.
pub fn request_sample<I: PlantIo>(
    cell: &MoistureCell,
    io: &mut I,
) -> Result<SampleRequest, I::Error> {
    if !cell.begin_conversion() {
        return Ok(SampleRequest::InFlight);
    }

    if let Err(e) = io.start_moisture_conversion() {
        cell.abort_conversion();
        return Err(e);
    }

    Ok(SampleRequest::Started)
}

/// Paces moisture conversion requests.
///
/// A request is due once strictly more than `period_ms` has elapsed since
/// the previous one. The first poll is always due.
#[derive(Clone, Debug)]
pub struct Sampler {
    period_ms: u32,
    last_request_ms: Option<u64>,
}

impl Sampler {
    /// Creates a sampler that requests at most one conversion per `period_ms`.
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms,
            last_request_ms: None,
        }
    }

    /// Sampling period in milliseconds.
    #[inline]
    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Returns `true` if a request would be issued at `now_ms`.
    pub fn is_due(&self, now_ms: u64) -> bool {
        match self.last_request_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) > u64::from(self.period_ms),
        }
    }

    /// Requests a conversion if the sampling period has elapsed.
    pub fn poll<I: PlantIo>(
        &mut self,
        cell: &MoistureCell,
        io: &mut I,
        now_ms: u64,
    ) -> Result<SampleRequest, I::Error> {
        if !self.is_due(now_ms) {
            return Ok(SampleRequest::NotDue);
        }
        self.request_now(cell, io, now_ms)
    }

    /// Requests a conversion immediately and restarts the period.
    pub fn request_now<I: PlantIo>(
        &mut self,
        cell: &MoistureCell,
        io: &mut I,
        now_ms: u64,
    ) -> Result<SampleRequest, I::Error> {
        self.last_request_ms = Some(now_ms);
        let outcome = request_sample(cell, io)?;
        if outcome == SampleRequest::InFlight {
            log::warn!("moisture conversion still in flight, reading is stale");
        }
        Ok(outcome)
    }
}

/// Tracks how long ago the main loop first observed the current sample.
///
/// The completion handler has no clock, so age is measured from the first
/// tick that sees a new generation.
#[derive(Clone, Debug, Default)]
pub struct SampleAge {
    seen_generation: u32,
    seen_at_ms: Option<u64>,
}

impl SampleAge {
    /// Creates a tracker that has not seen any sample.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the cell's generation at `now_ms`.
    pub fn observe(&mut self, cell: &MoistureCell, now_ms: u64) {
        let generation = cell.generation();
        if generation != self.seen_generation {
            self.seen_generation = generation;
            self.seen_at_ms = Some(now_ms);
        }
    }

    /// Milliseconds since the current sample was first observed.
    ///
    /// `None` until the first sample completes.
    pub fn age_ms(&self, now_ms: u64) -> Option<u64> {
        self.seen_at_ms.map(|at| now_ms.saturating_sub(at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::MockIo;

    #[test]
    fn new_cell_is_idle_and_zero() {
        let cell = MoistureCell::new();
        assert_eq!(cell.reading(), 0);
        assert_eq!(cell.generation(), 0);
        assert!(!cell.is_converting());
    }

    #[test]
    fn completion_stores_reading_and_bumps_generation() {
        let cell = MoistureCell::new();
        cell.on_sample_ready(640);
        assert_eq!(cell.reading(), 640);
        assert_eq!(cell.generation(), 1);

        cell.on_sample_ready(610);
        assert_eq!(cell.reading(), 610);
        assert_eq!(cell.generation(), 2);
    }

    #[test]
    fn reading_stable_until_next_completion() {
        let cell = MoistureCell::new();
        let mut io = MockIo::new();
        cell.on_sample_ready(420);

        request_sample(&cell, &mut io).unwrap();
        assert!(cell.is_converting());
        // In-flight conversion does not touch the stored value
        assert_eq!(cell.reading(), 420);
        assert_eq!(cell.reading(), 420);
    }

    #[test]
    fn overlapping_request_is_ignored() {
        let cell = MoistureCell::new();
        let mut io = MockIo::new();

        assert_eq!(request_sample(&cell, &mut io).unwrap(), SampleRequest::Started);
        assert_eq!(request_sample(&cell, &mut io).unwrap(), SampleRequest::InFlight);
        assert_eq!(io.conversions_started, 1);

        cell.on_sample_ready(300);
        assert_eq!(request_sample(&cell, &mut io).unwrap(), SampleRequest::Started);
        assert_eq!(io.conversions_started, 2);
    }

    #[test]
    fn failed_start_releases_converter() {
        let cell = MoistureCell::new();
        let mut io = MockIo::new();
        io.fail_conversion = true;

        assert!(request_sample(&cell, &mut io).is_err());
        assert!(!cell.is_converting());

        io.fail_conversion = false;
        assert_eq!(request_sample(&cell, &mut io).unwrap(), SampleRequest::Started);
    }

    #[test]
    fn sampler_waits_strictly_longer_than_period() {
        let cell = MoistureCell::new();
        let mut io = MockIo::new().with_moisture(500);
        let mut sampler = Sampler::new(1000);

        assert_eq!(sampler.poll(&cell, &mut io, 0).unwrap(), SampleRequest::Started);
        io.complete_conversion(&cell);
        assert_eq!(sampler.poll(&cell, &mut io, 999).unwrap(), SampleRequest::NotDue);
        assert_eq!(sampler.poll(&cell, &mut io, 1000).unwrap(), SampleRequest::NotDue);
        assert_eq!(sampler.poll(&cell, &mut io, 1001).unwrap(), SampleRequest::Started);
        assert_eq!(io.conversions_started, 2);
    }

    #[test]
    fn sampler_reports_stuck_conversion() {
        let cell = MoistureCell::new();
        let mut io = MockIo::new();
        let mut sampler = Sampler::new(1000);

        sampler.poll(&cell, &mut io, 0).unwrap();
        assert_eq!(sampler.poll(&cell, &mut io, 1500).unwrap(), SampleRequest::InFlight);
        assert_eq!(io.conversions_started, 1);
    }

    #[test]
    fn sample_age_tracks_new_generations() {
        let cell = MoistureCell::new();
        let mut age = SampleAge::new();

        age.observe(&cell, 0);
        assert_eq!(age.age_ms(100), None);

        cell.on_sample_ready(400);
        age.observe(&cell, 200);
        assert_eq!(age.age_ms(200), Some(0));
        assert_eq!(age.age_ms(1200), Some(1000));

        // Same generation: age keeps growing
        age.observe(&cell, 1500);
        assert_eq!(age.age_ms(1500), Some(1300));

        cell.on_sample_ready(410);
        age.observe(&cell, 1600);
        assert_eq!(age.age_ms(1600), Some(0));
    }

    #[test]
    fn completion_from_another_thread_is_visible() {
        use std::sync::Arc;

        let cell = Arc::new(MoistureCell::new());
        let writer = {
            let cell = Arc::clone(&cell);
            std::thread::spawn(move || {
                for raw in 1..=1000u16 {
                    cell.on_sample_ready(raw);
                }
            })
        };
        writer.join().unwrap();

        assert_eq!(cell.reading(), 1000);
        assert_eq!(cell.generation(), 1000);
    }
}
