//! Blocking microsecond delays
//!
//! The multiplexer needs a few microseconds after an address change before
//! its output is valid. That is the only blocking wait in the polling loop.

/// Short blocking delay
pub trait DelayUs {
    /// Busy-wait for at least `us` microseconds
    fn delay_us(&mut self, us: u32);
}

impl<T: DelayUs + ?Sized> DelayUs for &mut T {
    fn delay_us(&mut self, us: u32) {
        (**self).delay_us(us);
    }
}
