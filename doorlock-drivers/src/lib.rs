//! Hardware driver implementations
//!
//! Concrete implementations of the collaborator traits defined in
//! `doorlock-core`, written against the `doorlock-hal` pin traits and the
//! `embedded-hal-async` / `embedded-io-async` bus traits:
//!
//! - Door motor behind an H-bridge (direction pins + PWM enable)
//! - GPIO buzzer
//! - Password slot stores (24Cxx I2C EEPROM, MCU flash)
//! - 4x4 matrix keypad
//! - HD44780 16x2 LCD on a PCF8574 I2C backpack
//! - Serial link over any async UART

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod alarm;
pub mod display;
pub mod keypad;
pub mod link;
pub mod motor;
pub mod storage;

#[cfg(test)]
pub(crate) mod testutil;
