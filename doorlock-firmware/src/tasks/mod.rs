//! Embassy tasks for the control unit

mod authority;
mod door;
mod link;

pub use authority::{authority_task, BoardRunner};
pub use door::{door_tick_task, BoardDoor, BoardMotor, DOOR_ARMED};
pub use link::{link_rx_task, link_tx_task};
