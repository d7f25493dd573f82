//! Four-coil unipolar stepper driver over `embedded-hal` pins.
//!
//! Drives a 28BYJ-48 style motor through a ULN2003 board using the
//! two-coils-on full-step sequence:
//!
//! | Phase | IN1 | IN2 | IN3 | IN4 |
//! |-------|-----|-----|-----|-----|
//! | 0     | 1   | 0   | 1   | 0   |
//! | 1     | 0   | 1   | 1   | 0   |
//! | 2     | 0   | 1   | 0   | 1   |
//! | 3     | 1   | 0   | 0   | 1   |
//!
//! Each step waits `60_000_000 / steps_per_revolution / rpm` microseconds, so
//! [`step`](RotaryActuator::step) blocks until the motion is complete.
//!
//! The driver is generic over [`OutputPin`] and [`DelayNs`], so it runs on
//! any HAL (ESP-IDF `PinDriver` + `Ets` on the board, plain mocks in tests).

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::traits::RotaryActuator;

/// Coil levels for each phase of the full-step sequence.
pub const FULL_STEP_SEQUENCE: [[bool; 4]; 4] = [
    [true, false, true, false],
    [false, true, true, false],
    [false, true, false, true],
    [true, false, false, true],
];

/// Microseconds between steps for a motor speed.
///
/// A speed of zero is treated as 1 rpm.
///
/// # Examples
///
/// ```
/// use smart_pot::hal::step_delay_us;
///
/// // 28BYJ-48 geared output: 2048 steps/rev at 10 rpm
/// assert_eq!(step_delay_us(2048, 10), 2929);
/// ```
pub fn step_delay_us(steps_per_revolution: u32, rpm: u32) -> u32 {
    60_000_000 / steps_per_revolution.max(1) / rpm.max(1)
}

/// Stepper motor on four GPIO lines.
pub struct CoilStepper<P: OutputPin, D: DelayNs> {
    coils: [P; 4],
    delay: D,
    steps_per_revolution: u32,
    step_delay_us: u32,
    step_number: u32,
}

impl<P: OutputPin, D: DelayNs> CoilStepper<P, D> {
    /// Creates a driver. Coils are not energized until the first step.
    ///
    /// # Arguments
    ///
    /// * `coils` - IN1..IN4 output pins
    /// * `delay` - Blocking delay provider
    /// * `steps_per_revolution` - Steps per output shaft turn (2048 for a 28BYJ-48)
    pub fn new(coils: [P; 4], delay: D, steps_per_revolution: u32) -> Self {
        let steps_per_revolution = steps_per_revolution.max(1);
        Self {
            coils,
            delay,
            steps_per_revolution,
            step_delay_us: step_delay_us(steps_per_revolution, 1),
            step_number: 0,
        }
    }

    /// Current step index within one revolution.
    #[inline]
    pub fn step_number(&self) -> u32 {
        self.step_number
    }

    /// Delay between steps at the configured speed.
    #[inline]
    pub fn step_delay(&self) -> u32 {
        self.step_delay_us
    }

    fn energize(&mut self, phase: usize) -> Result<(), P::Error> {
        for (coil, &high) in self.coils.iter_mut().zip(FULL_STEP_SEQUENCE[phase].iter()) {
            if high {
                coil.set_high()?;
            } else {
                coil.set_low()?;
            }
        }
        Ok(())
    }
}

impl<P: OutputPin, D: DelayNs> RotaryActuator for CoilStepper<P, D> {
    type Error = P::Error;

    fn set_speed(&mut self, rpm: u32) -> Result<(), Self::Error> {
        self.step_delay_us = step_delay_us(self.steps_per_revolution, rpm);
        Ok(())
    }

    fn step(&mut self, steps: i32) -> Result<(), Self::Error> {
        let forward = steps > 0;
        for _ in 0..steps.unsigned_abs() {
            self.delay.delay_us(self.step_delay_us);

            self.step_number = if forward {
                (self.step_number + 1) % self.steps_per_revolution
            } else if self.step_number == 0 {
                self.steps_per_revolution - 1
            } else {
                self.step_number - 1
            };

            self.energize((self.step_number % 4) as usize)?;
        }
        Ok(())
    }

    /// De-energizes all coils so the motor does not heat while idle.
    /// The shaft keeps no holding torque until the next step.
    fn release(&mut self) -> Result<(), Self::Error> {
        for coil in &mut self.coils {
            coil.set_low()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone)]
    struct Pin {
        index: usize,
        levels: Rc<RefCell<[bool; 4]>>,
    }

    impl embedded_hal::digital::ErrorType for Pin {
        type Error = Infallible;
    }

    impl OutputPin for Pin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.levels.borrow_mut()[self.index] = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.levels.borrow_mut()[self.index] = true;
            Ok(())
        }
    }

    #[derive(Default)]
    struct Waits {
        total_ns: u64,
    }

    impl DelayNs for Waits {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += u64::from(ns);
        }
    }

    fn stepper() -> (CoilStepper<Pin, Waits>, Rc<RefCell<[bool; 4]>>) {
        let levels = Rc::new(RefCell::new([false; 4]));
        let coils = [0, 1, 2, 3].map(|index| Pin {
            index,
            levels: Rc::clone(&levels),
        });
        (CoilStepper::new(coils, Waits::default(), 2048), levels)
    }

    #[test]
    fn step_delay_matches_rpm() {
        assert_eq!(step_delay_us(2048, 10), 2929);
        assert_eq!(step_delay_us(200, 60), 5000);
        assert_eq!(step_delay_us(2048, 0), step_delay_us(2048, 1));
    }

    #[test]
    fn forward_steps_walk_sequence() {
        let (mut motor, levels) = stepper();
        motor.set_speed(10).unwrap();

        motor.step(1).unwrap();
        assert_eq!(*levels.borrow(), FULL_STEP_SEQUENCE[1]);
        motor.step(1).unwrap();
        assert_eq!(*levels.borrow(), FULL_STEP_SEQUENCE[2]);
        motor.step(2).unwrap();
        assert_eq!(*levels.borrow(), FULL_STEP_SEQUENCE[0]);
        assert_eq!(motor.step_number(), 4);
    }

    #[test]
    fn reverse_wraps_below_zero() {
        let (mut motor, levels) = stepper();
        motor.step(-1).unwrap();
        assert_eq!(motor.step_number(), 2047);
        assert_eq!(*levels.borrow(), FULL_STEP_SEQUENCE[3]);
    }

    #[test]
    fn forward_then_back_returns_to_start() {
        let (mut motor, _) = stepper();
        motor.step(50).unwrap();
        motor.step(-50).unwrap();
        assert_eq!(motor.step_number(), 0);
    }

    #[test]
    fn step_waits_per_step() {
        let (mut motor, _) = stepper();
        motor.set_speed(10).unwrap();
        motor.step(50).unwrap();
        assert_eq!(motor.delay.total_ns, 50 * 2929 * 1000);
    }

    #[test]
    fn zero_steps_do_nothing() {
        let (mut motor, levels) = stepper();
        motor.step(0).unwrap();
        assert_eq!(motor.step_number(), 0);
        assert_eq!(*levels.borrow(), [false; 4]);
        assert_eq!(motor.delay.total_ns, 0);
    }

    #[test]
    fn release_drops_all_coils() {
        let (mut motor, levels) = stepper();
        motor.step(3).unwrap();
        motor.release().unwrap();
        assert_eq!(*levels.borrow(), [false; 4]);
    }
}
