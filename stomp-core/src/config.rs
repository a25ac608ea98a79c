//! Compile-time tuning constants
//!
//! Runtime structs such as [`crate::input::InputConfig`] take their
//! defaults from here.

/// Debounce window, measured from the previous raw transition
pub const DEBOUNCE_MS: u32 = 20;

/// Toggle hold time before auto-repeat starts
pub const REPEAT_HOLD_MS: u32 = 800;

/// Toggle auto-repeat period once repeating
pub const REPEAT_PERIOD_MS: u32 = 60;

/// Mirror button hold time that triggers a setup reset
pub const LONG_PRESS_MS: u32 = 1000;

/// Multiplexer output settle time after an address change
pub const MUX_SETTLE_US: u32 = 10;

/// Quadrature sub-steps per encoder detent
pub const STEPS_PER_DETENT: i8 = 4;

/// Number of multiplexer channels
pub const MUX_CHANNELS: usize = 8;

/// Number of stomp switches (and of fader / stomp CC slots)
pub const STOMP_COUNT: usize = 4;

/// How often the firmware should re-read the fuel gauge
pub const BATTERY_REFRESH_MS: u32 = 2000;

/// Main loop period
pub const POLL_PERIOD_MS: u64 = 1;
