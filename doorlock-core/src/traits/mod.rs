//! Hardware abstraction traits
//!
//! These traits define the interface between the door locker logic and
//! the collaborators it drives: the serial link, the password store,
//! the door motor, the alarm buzzer, the display and the keypad.

pub mod alarm;
pub mod display;
pub mod keypad;
pub mod link;
pub mod motor;
pub mod store;

pub use alarm::Alarm;
pub use display::{Display, DisplayError, DisplayExt};
pub use keypad::{KeyCode, Keypad};
pub use link::{Link, LinkError};
pub use motor::{Direction, DoorMotor, MotorError};
pub use store::{SlotStore, StoreError, PASSWORD_SLOTS};
