//! Motor driver implementations
//!
//! The door is moved by a brushed DC motor behind an H-bridge (L293D or
//! similar): two direction inputs and a PWM enable.

pub mod hbridge;

pub use hbridge::{HBridgeConfig, HBridgeMotor};
