//! Async runners
//!
//! Drive a session over the collaborator traits. Firmware runs them inside
//! an embassy task; host tests run them with `embassy_futures::block_on`.

pub mod control;
pub mod hmi;

pub use control::{ControlError, ControlRunner};
pub use hmi::{HmiError, HmiRunner};
