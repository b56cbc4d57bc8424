//! Failed-attempt lockout
//!
//! Counts consecutive authentication failures and decides when the breach
//! response starts.

pub mod policy;

pub use policy::{LockoutPolicy, LockoutStatus, DEFAULT_MAX_FAILURES};
