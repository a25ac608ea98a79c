//! embedded-hal 1.0 adapters
//!
//! Newtype wrappers that let any `embedded-hal` pin or delay stand in for
//! the traits of this crate. Pin errors are treated as "low" on reads and
//! ignored on writes; every chip HAL the firmware targets reports
//! `Infallible` for GPIO.

use crate::delay::DelayUs;
use crate::gpio::{InputPin, OutputPin};

/// Wraps an `embedded_hal` digital pin
#[derive(Debug)]
pub struct EhPin<P>(pub P);

impl<P> EhPin<P> {
    /// Wrap a pin
    pub fn new(pin: P) -> Self {
        Self(pin)
    }

    /// Return the wrapped pin
    pub fn into_inner(self) -> P {
        self.0
    }
}

impl<P: embedded_hal::digital::InputPin> InputPin for EhPin<P> {
    fn is_high(&mut self) -> bool {
        matches!(self.0.is_high(), Ok(true))
    }
}

impl<P: embedded_hal::digital::OutputPin> OutputPin for EhPin<P> {
    fn set_high(&mut self) {
        let _ = self.0.set_high();
    }

    fn set_low(&mut self) {
        let _ = self.0.set_low();
    }
}

/// Wraps an `embedded_hal` blocking delay
#[derive(Debug)]
pub struct EhDelay<D>(pub D);

impl<D: embedded_hal::delay::DelayNs> DelayUs for EhDelay<D> {
    fn delay_us(&mut self, us: u32) {
        self.0.delay_us(us);
    }
}
