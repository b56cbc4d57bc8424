//! Door sequencer
//!
//! Turns elapsed ticks into door phases and motor commands, and shares the
//! sequencer and motor between the command loop and the periodic tick.

pub mod door;
pub mod shared;

pub use door::{DoorPhase, DoorSequencer, MotorCommand, PhaseEdge, SequencerError};
pub use shared::Door;
