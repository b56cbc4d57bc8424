//! RP2040-specific HAL for the Doorlock control unit
//!
//! Adapters from embassy-rp peripherals to the `doorlock-hal` traits:
//!
//! - GPIO outputs
//! - PWM slice channels for the door motor enable line
//! - UART line configuration
//! - Flash storage driver (implements `doorlock_hal::FlashStorage`)

#![no_std]
#![deny(unsafe_code)]

pub mod flash;
pub mod gpio;
pub mod pwm;
pub mod uart;

// Re-export shared traits from doorlock-hal for convenience
pub use doorlock_hal::{FlashStorage as FlashStorageTrait, StorageKey};
pub use flash::Rp2040FlashStorage;
pub use gpio::RpOutput;
pub use pwm::{PwmChannel, RpPwm};
