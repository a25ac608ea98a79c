//! Stompbox Hardware Abstraction Layer
//!
//! This crate defines the small set of hardware traits the pedal logic is
//! written against. The firmware implements them for ESP32-S3 peripherals;
//! host tests implement them with plain mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  stomp-core (input layer, menu, store)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  stomp-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ embedded-hal  │       │  host mocks   │
//! │   adapters    │       │   (tests)     │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`delay::DelayUs`] - Short blocking settle delays
//! - [`clock::Clock`] - Monotonic millisecond counter
//! - [`storage::KeyValueStorage`] - Persistent settings storage

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod clock;
pub mod delay;
pub mod gpio;
pub mod storage;

// Re-export key traits at crate root for convenience
pub use clock::{elapsed_ms, Clock};
pub use delay::DelayUs;
pub use gpio::{InputPin, OutputPin};
pub use storage::{KeyValueStorage, StorageError, StorageKey};
