//! Board-agnostic core logic for the doorlock terminal and control units
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Collaborator traits (link, store, motor, alarm, keypad, display)
//! - Configuration types and the `lock.toml` parser
//! - Failure counting and breach threshold
//! - Timed door sequencer and its lock-protected shared form
//! - Explicit state machines and sans-IO sessions for both units
//! - Async runners that drive the sessions over the traits
//! - Text-mode screens for the terminal

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod lockout;
pub mod runner;
pub mod sequencer;
pub mod session;
pub mod state;
pub mod traits;
pub mod ui;
