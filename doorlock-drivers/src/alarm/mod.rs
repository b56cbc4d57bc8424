//! Alarm output implementations

pub mod buzzer;

pub use buzzer::Buzzer;
