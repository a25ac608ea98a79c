//! Flash settings storage for ESP32-S3
//!
//! Uses sequential-storage for wear-leveled key-value storage in a
//! dedicated 64KB region at the end of a 4MB flash.
//!
//! Implements the `KeyValueStorage` trait from `stomp-hal`. Settings are
//! only written when the user confirms an edit, so the async map API is
//! driven to completion with `block_on` from the polling loop.

use core::ops::Range;

use embassy_embedded_hal::adapter::BlockingAsync;
use embassy_futures::block_on;
use embedded_storage_async::nor_flash::NorFlash;
use esp_storage::FlashStorage;
use sequential_storage::cache::NoCache;
use sequential_storage::map;
use stomp_hal::{KeyValueStorage, StorageError, StorageKey};

/// Flash range for the settings region
///
/// The partition table keeps the application below this range.
pub const SETTINGS_RANGE: Range<u32> = 0x3F_0000..0x40_0000;

/// Scratch space for one stored item (key, length and record)
const ITEM_BUFFER: usize = 128;

fn map_error<E>(err: sequential_storage::Error<E>) -> StorageError {
    match err {
        sequential_storage::Error::FullStorage { .. } => StorageError::Full,
        sequential_storage::Error::Corrupted { .. } => StorageError::Corrupted,
        sequential_storage::Error::BufferTooSmall { .. } => StorageError::BufferTooSmall,
        _ => StorageError::Flash,
    }
}

/// Settings storage on the on-chip flash
pub struct FlashSettingsStorage<'d> {
    flash: BlockingAsync<FlashStorage<'d>>,
}

impl<'d> FlashSettingsStorage<'d> {
    pub fn new(flash: FlashStorage<'d>) -> Self {
        Self {
            flash: BlockingAsync::new(flash),
        }
    }
}

impl KeyValueStorage for FlashSettingsStorage<'_> {
    fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, StorageError> {
        let mut data_buffer = [0u8; ITEM_BUFFER];

        let result = block_on(map::fetch_item::<StorageKey, &[u8], _>(
            &mut self.flash,
            SETTINGS_RANGE,
            &mut NoCache::new(),
            &mut data_buffer,
            &key,
        ));

        match result {
            Ok(Some(data)) => {
                let len = data.len();
                if buffer.len() < len {
                    return Err(StorageError::BufferTooSmall);
                }
                buffer[..len].copy_from_slice(data);
                Ok(len)
            }
            Ok(None) => Err(StorageError::NotFound),
            Err(err) => Err(map_error(err)),
        }
    }

    fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), StorageError> {
        let mut data_buffer = [0u8; ITEM_BUFFER];

        block_on(map::store_item(
            &mut self.flash,
            SETTINGS_RANGE,
            &mut NoCache::new(),
            &mut data_buffer,
            &key,
            &data,
        ))
        .map_err(map_error)
    }

    fn erase_all(&mut self) -> Result<(), StorageError> {
        block_on(self.flash.erase(SETTINGS_RANGE.start, SETTINGS_RANGE.end))
            .map_err(|_| StorageError::Flash)
    }
}
