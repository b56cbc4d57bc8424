//! Password slots in MCU flash
//!
//! Each slot is one item in a wear-levelled key-value partition. A slot
//! that was never written reads as zero, the same as an erased EEPROM
//! cell after the first define.

use doorlock_core::traits::{SlotStore, StoreError, PASSWORD_SLOTS};
use doorlock_hal::{FlashError, FlashStorage, StorageKey};

/// Slot store on top of a [`FlashStorage`] partition
pub struct FlashSlotStore<F> {
    flash: F,
}

impl<F: FlashStorage> FlashSlotStore<F> {
    /// Wrap a flash partition
    pub fn new(flash: F) -> Self {
        Self { flash }
    }

    /// Release the partition
    pub fn into_inner(self) -> F {
        self.flash
    }

    /// Forget every slot
    pub async fn erase(&mut self) -> Result<(), StoreError> {
        self.flash
            .erase_all()
            .await
            .map_err(|_| StoreError::Storage)
    }

    fn key(slot: u8) -> Result<StorageKey, StoreError> {
        if slot >= PASSWORD_SLOTS {
            return Err(StoreError::InvalidSlot(slot));
        }
        StorageKey::slot(slot).ok_or(StoreError::InvalidSlot(slot))
    }
}

impl<F: FlashStorage> SlotStore for FlashSlotStore<F> {
    async fn read(&mut self, slot: u8) -> Result<u8, StoreError> {
        let key = Self::key(slot)?;
        let mut buffer = [0u8; 1];
        match self.flash.read(key, &mut buffer).await {
            Ok(1) => Ok(buffer[0]),
            Ok(_) => Err(StoreError::Storage),
            Err(FlashError::NotFound) => Ok(0),
            Err(_) => Err(StoreError::Storage),
        }
    }

    async fn write(&mut self, slot: u8, value: u8) -> Result<(), StoreError> {
        let key = Self::key(slot)?;
        self.flash
            .write(key, &[value])
            .await
            .map_err(|_| StoreError::Storage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doorlock_protocol::Password;
    use embassy_futures::block_on;
    use std::collections::BTreeMap;
    use std::vec::Vec;

    #[derive(Default)]
    struct MockFlash {
        items: BTreeMap<u8, Vec<u8>>,
        broken: bool,
    }

    impl FlashStorage for MockFlash {
        async fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, FlashError> {
            if self.broken {
                return Err(FlashError::Storage);
            }
            let data = self.items.get(&key.as_u8()).ok_or(FlashError::NotFound)?;
            let out = buffer
                .get_mut(..data.len())
                .ok_or(FlashError::BufferTooSmall)?;
            out.copy_from_slice(data);
            Ok(data.len())
        }

        async fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), FlashError> {
            if self.broken {
                return Err(FlashError::Flash);
            }
            self.items.insert(key.as_u8(), data.to_vec());
            Ok(())
        }

        async fn exists(&mut self, key: StorageKey) -> bool {
            self.items.contains_key(&key.as_u8())
        }

        async fn erase_all(&mut self) -> Result<(), FlashError> {
            self.items.clear();
            Ok(())
        }
    }

    #[test]
    fn test_unwritten_slot_reads_zero() {
        let mut store = FlashSlotStore::new(MockFlash::default());
        assert_eq!(block_on(store.read(3)), Ok(0));
        assert_eq!(block_on(store.load_password()), Ok(Password::BLANK));
    }

    #[test]
    fn test_slot_items() {
        let mut store = FlashSlotStore::new(MockFlash::default());
        let password = Password::new([9, 8, 7, 6, 5]);

        block_on(store.store_password(&password)).unwrap();
        assert_eq!(block_on(store.load_password()), Ok(password));

        let flash = store.into_inner();
        assert_eq!(flash.items.len(), 5);
        assert_eq!(flash.items.get(&0x40), Some(&vec![9]));
    }

    #[test]
    fn test_erase_forgets_password() {
        let mut store = FlashSlotStore::new(MockFlash::default());
        block_on(store.write(0, 1)).unwrap();
        block_on(store.erase()).unwrap();
        assert_eq!(block_on(store.read(0)), Ok(0));
    }

    #[test]
    fn test_errors() {
        let mut store = FlashSlotStore::new(MockFlash {
            broken: true,
            ..MockFlash::default()
        });
        assert_eq!(block_on(store.read(5)), Err(StoreError::InvalidSlot(5)));
        assert_eq!(block_on(store.read(0)), Err(StoreError::Storage));
        assert_eq!(block_on(store.write(0, 1)), Err(StoreError::Storage));
    }
}
