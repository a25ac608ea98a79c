//! Monotonic millisecond clock
//!
//! Timestamps are `u32` milliseconds and wrap after ~49.7 days. All interval
//! arithmetic goes through [`elapsed_ms`] so the wrap is invisible as long as
//! the compared timestamps are less than one wrap period apart.

/// Monotonic millisecond time source
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin
    fn now_ms(&self) -> u32;
}

/// Milliseconds from `since` to `now`, tolerant of counter wraparound
#[inline]
pub const fn elapsed_ms(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}
