//! Serial link implementations

pub mod serial;

pub use serial::{uart_config, SerialLink};
