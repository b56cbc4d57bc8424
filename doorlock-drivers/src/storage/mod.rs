//! Password slot stores
//!
//! - [`Eeprom24`]: external 24Cxx EEPROM on I2C (default)
//! - [`FlashSlotStore`]: wear-levelled items in the MCU's own flash

pub mod eeprom;
pub mod flash;

pub use eeprom::{Eeprom24, EepromConfig};
pub use flash::FlashSlotStore;
