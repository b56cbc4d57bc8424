//! Text-mode user interface for the terminal
//!
//! `HmiView` describes what the terminal shows; `Screen` is a character
//! buffer that any `Display` can be rendered into and flushed from.

pub mod screen;
pub mod view;

pub use screen::{Screen, SCREEN_COLS, SCREEN_ROWS};
pub use view::HmiView;
