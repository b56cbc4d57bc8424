//! Sans-IO protocol sessions
//!
//! A session owns the per-unit state that used to live in globals: the
//! cached password, the entry buffers, the failure counter. It never
//! touches hardware. Each input yields the actions or effects the caller
//! must carry out, and the caller reports their completion back.

pub mod control;
pub mod hmi;

pub use control::{ControlAction, ControlSession};
pub use hmi::{Effect, Effects, HmiSession, WaitKind, MAX_EFFECTS};
