//! Configuration types
//!
//! Board-agnostic configuration and the `lock.toml` parser used by both
//! firmware images.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;
