//! Doorlock Hardware Abstraction Layer
//!
//! Chip-agnostic traits implemented by the chip-specific HALs (RP2040 on
//! the control unit, STM32F0 on the terminal). The drivers in
//! `doorlock-drivers` are written against these traits only.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  doorlock-firmware / doorlock-terminal-fw│
//! └──────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌──────────────────────────────────────────┐
//! │  doorlock-drivers (motor, keypad, ...)   │
//! └──────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌──────────────────────────────────────────┐
//! │  doorlock-hal (this crate - traits)      │
//! └──────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ doorlock-hal- │       │ doorlock-hal- │
//! │    rp2040     │       │   stm32f0     │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`pwm::PwmOutput`] - Duty-cycle output for the door motor
//! - [`flash::FlashStorage`] - Wear-levelled password slots
//!
//! [`uart::UartConfig`] describes the inter-unit link framing.

#![no_std]
#![deny(unsafe_code)]

pub mod flash;
pub mod gpio;
pub mod pwm;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use flash::{FlashError, FlashStorage, StorageKey};
pub use gpio::{ActiveLow, InputPin, OutputPin};
pub use pwm::PwmOutput;
pub use uart::UartConfig;
