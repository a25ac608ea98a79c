//! Board-agnostic core logic for the foot-controller firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Multiplexer scanning, debouncing and quadrature decoding
//! - Button, toggle auto-repeat and long-press tracking
//! - Typed settings with clamped ranges and a persistent store
//! - Menu navigator and the setup screens it drives
//! - Setup session tying input events to the navigator
//! - Brightness duty curves for the LED ring and backlight
//!
//! Nothing here draws. The navigator returns [`menu::Update`] descriptors
//! and the display crate renders them.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod battery;
pub mod brightness;
pub mod config;
pub mod input;
pub mod menu;
pub mod session;
pub mod settings;

pub use battery::BatteryStatus;
pub use input::{Direction, InputEvent, InputTracker, RawSample};
pub use menu::{Navigator, NodeId, Update};
pub use session::SetupSession;
pub use settings::{Setting, Settings, SettingsStore};
