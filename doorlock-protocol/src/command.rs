//! Commands sent by the terminal
//!
//! Every command is a single byte. Define and check are followed by their
//! password payload with no length prefix.

use heapless::Vec;

use crate::password::{Password, PASSWORD_LEN};

// Command bytes: terminal → control
pub const CMD_DEFINE_PASSWORD: u8 = 0x02;
pub const CMD_CHECK_PASSWORD: u8 = 0x03;
pub const CMD_OPEN_DOOR: u8 = 0x04;
pub const CMD_BREACH: u8 = 0xF0;

/// Largest encoded request (define: command + entry + repeat)
pub const MAX_REQUEST_SIZE: usize = 1 + 2 * PASSWORD_LEN;

/// Command byte vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Store a new password after confirming the repeat entry
    DefinePassword,
    /// Compare a candidate against the stored password
    CheckPassword,
    /// Run the door open/hold/close cycle
    OpenDoor,
    /// Third consecutive failure on the terminal
    Breach,
}

impl Command {
    /// Parse a command from its wire byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            CMD_DEFINE_PASSWORD => Some(Command::DefinePassword),
            CMD_CHECK_PASSWORD => Some(Command::CheckPassword),
            CMD_OPEN_DOOR => Some(Command::OpenDoor),
            CMD_BREACH => Some(Command::Breach),
            _ => None,
        }
    }

    /// Convert to wire byte
    pub fn to_byte(self) -> u8 {
        match self {
            Command::DefinePassword => CMD_DEFINE_PASSWORD,
            Command::CheckPassword => CMD_CHECK_PASSWORD,
            Command::OpenDoor => CMD_OPEN_DOOR,
            Command::Breach => CMD_BREACH,
        }
    }

    /// Number of payload bytes that follow the command byte
    pub fn payload_len(self) -> usize {
        match self {
            Command::DefinePassword => 2 * PASSWORD_LEN,
            Command::CheckPassword => PASSWORD_LEN,
            Command::OpenDoor | Command::Breach => 0,
        }
    }
}

/// A complete request: command plus decoded payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Request {
    /// New password and its confirmation
    DefinePassword {
        entry: Password,
        confirmation: Password,
    },
    /// Candidate password to check
    CheckPassword(Password),
    /// Open the door
    OpenDoor,
    /// Report a breach
    Breach,
}

impl Request {
    /// The command byte this request starts with
    pub fn command(&self) -> Command {
        match self {
            Request::DefinePassword { .. } => Command::DefinePassword,
            Request::CheckPassword(_) => Command::CheckPassword,
            Request::OpenDoor => Command::OpenDoor,
            Request::Breach => Command::Breach,
        }
    }

    /// Encode this request into the bytes sent over the link
    pub fn encode(&self) -> Vec<u8, MAX_REQUEST_SIZE> {
        let mut out = Vec::new();
        // Capacity covers the largest request, pushes cannot fail
        let _ = out.push(self.command().to_byte());
        match self {
            Request::DefinePassword {
                entry,
                confirmation,
            } => {
                let _ = out.extend_from_slice(entry.as_bytes());
                let _ = out.extend_from_slice(confirmation.as_bytes());
            }
            Request::CheckPassword(candidate) => {
                let _ = out.extend_from_slice(candidate.as_bytes());
            }
            Request::OpenDoor | Request::Breach => {}
        }
        out
    }
}
