//! Keypad trait and key codes

/// A decoded key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyCode {
    /// Digit key, value 0-9
    Digit(u8),
    /// `-`: clear entry, or "change password" on the menu
    Minus,
    /// `+`: "open door" on the menu
    Plus,
    /// `=`: submit entry
    Equals,
    /// `*`
    Multiply,
    /// `%`
    Percent,
    /// `ON/C`
    On,
}

impl KeyCode {
    /// Decode the legacy key value (digits 0-9, ASCII for symbols, 13 for ON/C)
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0..=9 => Some(KeyCode::Digit(raw)),
            13 => Some(KeyCode::On),
            b'-' => Some(KeyCode::Minus),
            b'+' => Some(KeyCode::Plus),
            b'=' => Some(KeyCode::Equals),
            b'*' => Some(KeyCode::Multiply),
            b'%' => Some(KeyCode::Percent),
            _ => None,
        }
    }

    /// Digit value if this is a digit key
    pub fn digit(self) -> Option<u8> {
        match self {
            KeyCode::Digit(value) => Some(value),
            _ => None,
        }
    }
}

/// Blocking keypad
///
/// `read_key` resolves once per press; debouncing and waiting for release
/// are the implementation's job.
pub trait Keypad {
    /// Wait for the next key press
    fn read_key(&mut self) -> impl core::future::Future<Output = KeyCode>;
}
