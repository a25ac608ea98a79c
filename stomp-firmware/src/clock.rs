//! Millisecond clock backed by the embassy time driver

use embassy_time::Instant;
use stomp_hal::Clock;

/// `Clock` over `embassy_time::Instant`
///
/// Truncates to `u32`; the core only compares timestamps through
/// `elapsed_ms`, which handles the wrap.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u32 {
        Instant::now().as_millis() as u32
    }
}
