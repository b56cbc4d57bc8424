//! Flash storage abstractions
//!
//! Wear-levelled key-value storage in the MCU's own flash, used as an
//! alternative to the external EEPROM for the password slots.

/// Highest slot index a key can address
pub const MAX_SLOT: u8 = 0x3F;

/// Prefix marking password-slot keys
const SLOT_TAG: u8 = 0x40;

/// Storage key for one password slot
///
/// Serialized as a single byte (`0x40 | slot`) so keys from unrelated
/// records in the same partition can never collide with slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StorageKey(u8);

impl StorageKey {
    /// Key for `slot`, or `None` past [`MAX_SLOT`]
    pub const fn slot(slot: u8) -> Option<Self> {
        if slot > MAX_SLOT {
            None
        } else {
            Some(Self(slot))
        }
    }

    /// Slot index this key addresses
    pub const fn slot_index(self) -> u8 {
        self.0
    }

    /// Get the key as a byte value
    pub const fn as_u8(self) -> u8 {
        SLOT_TAG | self.0
    }

    /// Create a key from a byte value
    pub const fn from_u8(value: u8) -> Option<Self> {
        if value & !MAX_SLOT != SLOT_TAG {
            return None;
        }
        Some(Self(value & MAX_SLOT))
    }
}

/// Errors from flash storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlashError {
    /// Flash operation failed
    Flash,
    /// Storage layer failed (corrupt or full partition)
    Storage,
    /// Key not found
    NotFound,
    /// Buffer too small for the data
    BufferTooSmall,
}

/// Flash storage trait
///
/// Implementations handle wear levelling and data integrity.
pub trait FlashStorage {
    /// Read a value by key into the provided buffer
    ///
    /// Returns the number of bytes read.
    fn read(
        &mut self,
        key: StorageKey,
        buffer: &mut [u8],
    ) -> impl core::future::Future<Output = Result<usize, FlashError>>;

    /// Write a value by key, replacing any previous value
    fn write(
        &mut self,
        key: StorageKey,
        data: &[u8],
    ) -> impl core::future::Future<Output = Result<(), FlashError>>;

    /// Check if a key exists in storage
    fn exists(&mut self, key: StorageKey) -> impl core::future::Future<Output = bool>;

    /// Erase the whole partition
    fn erase_all(&mut self) -> impl core::future::Future<Output = Result<(), FlashError>>;
}

// Implement the sequential-storage Key trait when the feature is enabled
#[cfg(feature = "sequential-storage")]
impl sequential_storage::map::Key for StorageKey {
    fn serialize_into(
        &self,
        buffer: &mut [u8],
    ) -> Result<usize, sequential_storage::map::SerializationError> {
        let first = buffer
            .first_mut()
            .ok_or(sequential_storage::map::SerializationError::BufferTooSmall)?;
        *first = self.as_u8();
        Ok(1)
    }

    fn deserialize_from(
        buffer: &[u8],
    ) -> Result<(Self, usize), sequential_storage::map::SerializationError> {
        let first = buffer
            .first()
            .ok_or(sequential_storage::map::SerializationError::BufferTooSmall)?;
        match StorageKey::from_u8(*first) {
            Some(key) => Ok((key, 1)),
            None => Err(sequential_storage::map::SerializationError::InvalidFormat),
        }
    }
}
