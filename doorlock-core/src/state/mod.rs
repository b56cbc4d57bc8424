//! Protocol state machines
//!
//! Both units are explicit, finite and deterministic: every change of
//! state is a `transition(event)` on one of these enums. The sessions
//! decide which event happened; the enums decide where that leads.

pub mod control;
pub mod hmi;

pub use control::{ControlEvent, ControlState};
pub use hmi::{HmiEvent, HmiState, DOOR_HEARTBEATS};
