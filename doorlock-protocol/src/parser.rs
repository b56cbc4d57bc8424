//! Request parsing on the control unit
//!
//! The link carries no framing, so the parser is a small state machine:
//! - wait for a known command byte
//! - collect exactly `Command::payload_len()` payload bytes
//! - emit the decoded `Request`
//!
//! Unknown command bytes are reported and skipped; the parser keeps waiting
//! for the next command.

use heapless::Vec;

use crate::command::{Command, Request};
use crate::password::{Password, PASSWORD_LEN};

/// Largest payload (define: entry + repeat)
const MAX_PAYLOAD_SIZE: usize = 2 * PASSWORD_LEN;

/// Errors reported while parsing requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Byte is not a command; it was discarded
    UnknownCommand(u8),
}

/// State machine for parsing incoming requests
#[derive(Debug, Clone)]
pub struct RequestParser {
    state: ParseState,
    command: Option<Command>,
    payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Waiting for a command byte
    WaitingForCommand,
    /// Reading the payload of the current command
    ReadingPayload,
}

impl Default for RequestParser {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestParser {
    /// Create a new request parser
    pub fn new() -> Self {
        Self {
            state: ParseState::WaitingForCommand,
            command: None,
            payload: Vec::new(),
        }
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.state = ParseState::WaitingForCommand;
        self.command = None;
        self.payload.clear();
    }

    /// True while a command byte has been seen but its payload is incomplete
    pub fn is_mid_request(&self) -> bool {
        self.state == ParseState::ReadingPayload
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(request))` when a request is complete,
    /// `Ok(None)` when more bytes are needed, or `Err` for an unknown command.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Request>, ParseError> {
        match self.state {
            ParseState::WaitingForCommand => {
                let command = Command::from_byte(byte).ok_or(ParseError::UnknownCommand(byte))?;
                if command.payload_len() == 0 {
                    return Ok(Some(Self::decode(command, &[])));
                }
                self.command = Some(command);
                self.payload.clear();
                self.state = ParseState::ReadingPayload;
                Ok(None)
            }
            ParseState::ReadingPayload => {
                let Some(command) = self.command else {
                    self.reset();
                    return Ok(None);
                };
                // Capacity matches the largest payload
                let _ = self.payload.push(byte);
                if self.payload.len() < command.payload_len() {
                    return Ok(None);
                }

                let request = Self::decode(command, &self.payload);
                self.reset();
                Ok(Some(request))
            }
        }
    }

    /// Feed multiple bytes to the parser
    ///
    /// Returns the first complete request found, if any.
    /// Remaining bytes after a complete request are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Request>, ParseError> {
        for &byte in bytes {
            if let Some(request) = self.feed(byte)? {
                return Ok(Some(request));
            }
        }
        Ok(None)
    }

    fn decode(command: Command, payload: &[u8]) -> Request {
        match command {
            Command::DefinePassword => Request::DefinePassword {
                entry: password_at(payload, 0),
                confirmation: password_at(payload, PASSWORD_LEN),
            },
            Command::CheckPassword => Request::CheckPassword(password_at(payload, 0)),
            Command::OpenDoor => Request::OpenDoor,
            Command::Breach => Request::Breach,
        }
    }
}

fn password_at(payload: &[u8], offset: usize) -> Password {
    let mut bytes = [0u8; PASSWORD_LEN];
    if let Some(src) = payload.get(offset..offset + PASSWORD_LEN) {
        bytes.copy_from_slice(src);
    }
    Password::new(bytes)
}
