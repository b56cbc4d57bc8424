//! 24Cxx I2C EEPROM slot store
//!
//! The 24C01-24C16 family addresses up to 2KB with an 11-bit word
//! address: the top three bits select one of eight 256-byte blocks through
//! the device address, the low eight bits go out as the first data byte.
//!
//! ```text
//! device = 0x50 | ((addr >> 8) & 0x07)     (0xA0 | ... in 8-bit form)
//! write:  [device+W] [addr & 0xFF] [data]          then write-cycle delay
//! read:   [device+W] [addr & 0xFF] [device+R] [data]
//! ```
//!
//! Slot `n` lives at `base_address + n`.

use doorlock_core::config::StoreConfig;
use doorlock_core::traits::{SlotStore, StoreError, PASSWORD_SLOTS};
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

/// 7-bit device address of block 0
pub const EEPROM_BASE_ADDR: u8 = 0x50;

/// Bytes addressable with an 11-bit word address
pub const EEPROM_SIZE: u16 = 0x0800;

/// EEPROM driver settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EepromConfig {
    /// Word address of slot 0
    pub base_address: u16,
    /// Wait after each byte write for the internal write cycle (ms)
    pub write_cycle_ms: u32,
}

impl Default for EepromConfig {
    fn default() -> Self {
        Self {
            base_address: 0x0001,
            write_cycle_ms: 10,
        }
    }
}

impl EepromConfig {
    /// Settings for the configured store
    pub fn from_store(store: &StoreConfig) -> Self {
        Self {
            base_address: store.base_address,
            ..Self::default()
        }
    }
}

/// Split a word address into (device address, word byte)
pub fn device_address(addr: u16) -> (u8, u8) {
    let block = ((addr >> 8) & 0x07) as u8;
    (EEPROM_BASE_ADDR | block, (addr & 0xFF) as u8)
}

/// 24Cxx EEPROM on an async I2C bus
pub struct Eeprom24<I, D> {
    i2c: I,
    delay: D,
    config: EepromConfig,
}

impl<I: I2c, D: DelayNs> Eeprom24<I, D> {
    /// Create a new EEPROM driver
    pub fn new(i2c: I, delay: D, config: EepromConfig) -> Self {
        Self { i2c, delay, config }
    }

    /// Get the configuration
    pub fn config(&self) -> &EepromConfig {
        &self.config
    }

    /// Read one byte at a word address
    pub async fn read_byte(&mut self, addr: u16) -> Result<u8, StoreError> {
        let (device, word) = device_address(addr);
        let mut data = [0u8; 1];
        self.i2c
            .write_read(device, &[word], &mut data)
            .await
            .map_err(|_| StoreError::Bus)?;
        Ok(data[0])
    }

    /// Write one byte at a word address and wait out the write cycle
    pub async fn write_byte(&mut self, addr: u16, value: u8) -> Result<(), StoreError> {
        let (device, word) = device_address(addr);
        self.i2c
            .write(device, &[word, value])
            .await
            .map_err(|_| StoreError::Bus)?;
        self.delay.delay_ms(self.config.write_cycle_ms).await;
        Ok(())
    }

    fn slot_address(&self, slot: u8) -> Result<u16, StoreError> {
        if slot >= PASSWORD_SLOTS {
            return Err(StoreError::InvalidSlot(slot));
        }
        let addr = self
            .config
            .base_address
            .checked_add(u16::from(slot))
            .ok_or(StoreError::InvalidSlot(slot))?;
        if addr >= EEPROM_SIZE {
            return Err(StoreError::InvalidSlot(slot));
        }
        Ok(addr)
    }
}

impl<I: I2c, D: DelayNs> SlotStore for Eeprom24<I, D> {
    async fn read(&mut self, slot: u8) -> Result<u8, StoreError> {
        let addr = self.slot_address(slot)?;
        self.read_byte(addr).await
    }

    async fn write(&mut self, slot: u8, value: u8) -> Result<(), StoreError> {
        let addr = self.slot_address(slot)?;
        self.write_byte(addr, value).await
    }
}
