//! Password store selected at boot

use embassy_rp::i2c::{Async, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::Delay;

use doorlock_core::traits::{SlotStore, StoreError};
use doorlock_drivers::storage::{Eeprom24, FlashSlotStore};
use doorlock_hal_rp2040::Rp2040FlashStorage;

/// External EEPROM on I2C0
pub type EepromStore = Eeprom24<I2c<'static, I2C0, Async>, Delay>;

/// Slots in the on-chip flash
pub type FlashStore = FlashSlotStore<Rp2040FlashStorage<'static>>;

/// Whichever backend `[store] backend` picked
pub enum BoardStore {
    Eeprom(EepromStore),
    Flash(FlashStore),
}

impl SlotStore for BoardStore {
    async fn read(&mut self, slot: u8) -> Result<u8, StoreError> {
        match self {
            BoardStore::Eeprom(store) => store.read(slot).await,
            BoardStore::Flash(store) => store.read(slot).await,
        }
    }

    async fn write(&mut self, slot: u8, value: u8) -> Result<(), StoreError> {
        match self {
            BoardStore::Eeprom(store) => store.write(slot, value).await,
            BoardStore::Flash(store) => store.write(slot, value).await,
        }
    }
}
