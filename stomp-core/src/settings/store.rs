//! Settings stores
//!
//! [`SettingsStore`] is the typed get/set surface the setup screens talk
//! to. [`PersistentStore`] keeps a RAM copy and writes the whole record
//! through to flash on every confirmed change.

use stomp_hal::{KeyValueStorage, StorageError, StorageKey};

use super::values::{Setting, Settings};

/// Layout version of the persisted [`Settings`] record
pub const SCHEMA_VERSION: u8 = 1;

/// Upper bound on the encoded record size
pub const RECORD_CAPACITY: usize = 32;

/// Errors from persisting settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingsError {
    /// Underlying storage failed
    Storage(StorageError),
    /// Record could not be encoded
    Encode,
    /// Stored record could not be decoded
    Decode,
    /// Stored schema version differs from [`SCHEMA_VERSION`]
    SchemaMismatch(u8),
}

impl From<StorageError> for SettingsError {
    fn from(err: StorageError) -> Self {
        SettingsError::Storage(err)
    }
}

/// Typed access to user settings
///
/// `set` clamps into the setting's range. Callers invoke it once per
/// confirmed edit, never per encoder detent.
pub trait SettingsStore {
    /// Current value of a setting
    fn get(&self, key: Setting) -> u8;

    /// Store a new value
    fn set(&mut self, key: Setting, value: u8);
}

impl<T: SettingsStore + ?Sized> SettingsStore for &mut T {
    fn get(&self, key: Setting) -> u8 {
        (**self).get(key)
    }

    fn set(&mut self, key: Setting, value: u8) {
        (**self).set(key, value)
    }
}

/// RAM-only store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    settings: Settings,
}

impl MemoryStore {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: Setting) -> u8 {
        self.settings.get(key)
    }

    fn set(&mut self, key: Setting, value: u8) {
        self.settings.set(key, value);
    }
}

/// Flash-backed store
///
/// Reads are served from RAM. Writes update RAM first, so a failing flash
/// write never leaves the UI showing a value the firmware isn't using.
pub struct PersistentStore<K> {
    storage: K,
    settings: Settings,
}

impl<K: KeyValueStorage> PersistentStore<K> {
    /// Load settings from storage
    ///
    /// A missing record, a schema version mismatch or an undecodable record
    /// all fall back to defaults, which are then written back.
    pub fn load(storage: K) -> Self {
        let mut store = Self {
            storage,
            settings: Settings::default(),
        };

        match store.read_record() {
            Ok(settings) => {
                info!("settings: loaded schema v{}", SCHEMA_VERSION);
                store.settings = settings;
            }
            Err(err) => {
                warn!("settings: {}, restoring defaults", err);
                if let Err(err) = store.reset() {
                    error!("settings: writing defaults failed: {}", err);
                }
            }
        }

        store
    }

    /// Replace everything with defaults and persist
    pub fn reset(&mut self) -> Result<(), SettingsError> {
        self.settings = Settings::default();
        self.storage.write(StorageKey::SchemaVersion, &[SCHEMA_VERSION])?;
        self.write_record()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Release the storage backend
    pub fn into_storage(self) -> K {
        self.storage
    }

    fn read_record(&mut self) -> Result<Settings, SettingsError> {
        let mut version = [0u8; 1];
        self.storage.read(StorageKey::SchemaVersion, &mut version)?;
        if version[0] != SCHEMA_VERSION {
            return Err(SettingsError::SchemaMismatch(version[0]));
        }

        let mut buffer = [0u8; RECORD_CAPACITY];
        let len = self.storage.read(StorageKey::Settings, &mut buffer)?;
        let settings: Settings =
            postcard::from_bytes(&buffer[..len]).map_err(|_| SettingsError::Decode)?;
        Ok(settings.sanitized())
    }

    fn write_record(&mut self) -> Result<(), SettingsError> {
        let mut buffer = [0u8; RECORD_CAPACITY];
        let encoded =
            postcard::to_slice(&self.settings, &mut buffer).map_err(|_| SettingsError::Encode)?;
        self.storage.write(StorageKey::Settings, encoded)?;
        Ok(())
    }
}

impl<K: KeyValueStorage> SettingsStore for PersistentStore<K> {
    fn get(&self, key: Setting) -> u8 {
        self.settings.get(key)
    }

    fn set(&mut self, key: Setting, value: u8) {
        let value = key.clamp(value);
        if self.settings.get(key) == value {
            debug!("settings: {} unchanged", key);
            return;
        }
        if !self.settings.set(key, value) {
            warn!("settings: no slot for {}", key);
            return;
        }

        info!("settings: {} = {}", key, value);
        if let Err(err) = self.write_record() {
            error!("settings: persist failed: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// In-memory key-value backend that counts writes
    #[derive(Default)]
    struct MockStorage {
        records: HashMap<u8, std::vec::Vec<u8>>,
        writes: usize,
        fail_writes: bool,
    }

    impl KeyValueStorage for MockStorage {
        fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, StorageError> {
            let data = self.records.get(&key.as_u8()).ok_or(StorageError::NotFound)?;
            if buffer.len() < data.len() {
                return Err(StorageError::BufferTooSmall);
            }
            buffer[..data.len()].copy_from_slice(data);
            Ok(data.len())
        }

        fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), StorageError> {
            if self.fail_writes {
                return Err(StorageError::Flash);
            }
            self.writes += 1;
            self.records.insert(key.as_u8(), data.to_vec());
            Ok(())
        }

        fn erase_all(&mut self) -> Result<(), StorageError> {
            self.records.clear();
            Ok(())
        }
    }

    #[test]
    fn test_blank_flash_gets_defaults_written() {
        let store = PersistentStore::load(MockStorage::default());
        assert_eq!(store.settings(), &Settings::default());

        let storage = store.into_storage();
        assert_eq!(storage.records.get(&0), Some(&vec![SCHEMA_VERSION]));
        assert!(storage.records.contains_key(&1));
    }

    #[test]
    fn test_values_survive_reload() {
        let mut store = PersistentStore::load(MockStorage::default());
        store.set(Setting::DinChannel, 9);
        store.set(Setting::StompCc(2), 64);
        store.set(Setting::MirrorDelay, 12);

        let reloaded = PersistentStore::load(store.into_storage());
        assert_eq!(reloaded.get(Setting::DinChannel), 9);
        assert_eq!(reloaded.get(Setting::StompCc(2)), 64);
        assert_eq!(reloaded.get(Setting::MirrorDelay), 12);
    }

    #[test]
    fn test_schema_mismatch_resets() {
        let mut store = PersistentStore::load(MockStorage::default());
        store.set(Setting::BleChannel, 5);

        let mut storage = store.into_storage();
        storage.records.insert(0, vec![SCHEMA_VERSION + 1]);

        let reloaded = PersistentStore::load(storage);
        assert_eq!(reloaded.get(Setting::BleChannel), 1);
        assert_eq!(
            reloaded.into_storage().records.get(&0),
            Some(&vec![SCHEMA_VERSION])
        );
    }

    #[test]
    fn test_corrupt_record_resets() {
        let mut storage = MockStorage::default();
        storage.records.insert(0, vec![SCHEMA_VERSION]);
        storage.records.insert(1, vec![0xFF]);

        let store = PersistentStore::load(storage);
        assert_eq!(store.settings(), &Settings::default());
    }

    #[test]
    fn test_unchanged_value_skips_flash() {
        let mut store = PersistentStore::load(MockStorage::default());
        let before = store.storage.writes;
        store.set(Setting::LedBrightness, Settings::default().led_brightness);
        assert_eq!(store.storage.writes, before);

        store.set(Setting::LedBrightness, 15);
        assert_eq!(store.storage.writes, before + 1);
    }

    #[test]
    fn test_failed_write_keeps_ram_value() {
        let mut store = PersistentStore::load(MockStorage::default());
        store.storage.fail_writes = true;
        store.set(Setting::TftBrightness, 4);
        assert_eq!(store.get(Setting::TftBrightness), 4);
    }

    #[test]
    fn test_memory_store_clamps() {
        let mut store = MemoryStore::default();
        store.set(Setting::FaderCc(0), 250);
        assert_eq!(store.get(Setting::FaderCc(0)), 127);
    }
}
