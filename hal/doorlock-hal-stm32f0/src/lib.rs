//! STM32F0-specific HAL for the Doorlock terminal
//!
//! Adapters from embassy-stm32 peripherals to the `doorlock-hal` traits,
//! for the keypad/LCD terminal:
//!
//! - STM32F042K6 (terminal board)
//!
//! # Features
//!
//! - `stm32f042k6` / `stm32f042f6` - chip selection
//! - `defmt` - Enable debug formatting support

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod uart;

pub use gpio::{StmInput, StmOutput};
pub use uart::uart_config;
