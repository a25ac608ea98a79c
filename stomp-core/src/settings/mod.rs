//! User settings
//!
//! Typed keys with clamped ranges, the persisted record, and the stores
//! that hold it.

pub mod store;
pub mod values;

pub use store::{MemoryStore, PersistentStore, SettingsError, SettingsStore, SCHEMA_VERSION};
pub use values::{Setting, Settings};
