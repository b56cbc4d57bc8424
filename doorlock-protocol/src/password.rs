//! Password value type
//!
//! A password is exactly five bytes. Keypad entry produces raw digit values
//! (0-9, not ASCII); the control unit stores and compares whatever bytes it
//! receives without interpreting them.

use core::fmt;

/// Number of bytes in a password
pub const PASSWORD_LEN: usize = 5;

/// Largest digit value accepted from the keypad
pub const MAX_DIGIT: u8 = 9;

/// Errors building a password from keypad input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PasswordError {
    /// Fewer or more than five digits supplied
    WrongLength(usize),
    /// Byte is not a digit value
    InvalidDigit(u8),
}

/// A five byte password
///
/// Stored and compared as plaintext. Equality is element-wise; `Debug`
/// output is masked so passwords never end up in logs.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Password([u8; PASSWORD_LEN]);

impl Password {
    /// The all-zero password, which is also what an erased store reads as
    pub const BLANK: Self = Self([0; PASSWORD_LEN]);

    /// Wrap raw bytes as received over the link or read from the store
    pub const fn new(bytes: [u8; PASSWORD_LEN]) -> Self {
        Self(bytes)
    }

    /// Build a password from keypad digits
    pub fn from_digits(digits: &[u8]) -> Result<Self, PasswordError> {
        if digits.len() != PASSWORD_LEN {
            return Err(PasswordError::WrongLength(digits.len()));
        }
        let mut bytes = [0u8; PASSWORD_LEN];
        for (slot, &digit) in bytes.iter_mut().zip(digits) {
            if digit > MAX_DIGIT {
                return Err(PasswordError::InvalidDigit(digit));
            }
            *slot = digit;
        }
        Ok(Self(bytes))
    }

    /// Raw bytes in slot order
    pub const fn as_bytes(&self) -> &[u8; PASSWORD_LEN] {
        &self.0
    }

    /// True when every byte is zero (indistinguishable from an empty store)
    pub fn is_blank(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    /// Index of the first differing byte, scanning from slot 0
    ///
    /// Stops at the first mismatch.
    pub fn first_mismatch(&self, other: &Password) -> Option<usize> {
        self.0.iter().zip(other.0.iter()).position(|(a, b)| a != b)
    }

    /// Byte-wise comparison with early exit on the first mismatch
    pub fn matches(&self, other: &Password) -> bool {
        self.first_mismatch(other).is_none()
    }
}

impl From<[u8; PASSWORD_LEN]> for Password {
    fn from(bytes: [u8; PASSWORD_LEN]) -> Self {
        Self(bytes)
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(*****)")
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Password {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Password(*****)");
    }
}
