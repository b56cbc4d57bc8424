//! Keypad implementations

pub mod matrix;

pub use matrix::{KeypadConfig, MatrixKeypad, KEY_MAP};
