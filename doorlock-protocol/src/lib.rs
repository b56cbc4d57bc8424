//! Doorlock terminal/control protocol
//!
//! This crate defines the byte protocol spoken between the keypad terminal
//! (HMI unit) and the control unit over a plain UART link (9600 baud, 8E1).
//!
//! # Protocol Overview
//!
//! There is no framing. The terminal sends one command byte, immediately
//! followed by a payload whose length is implied by the command:
//! ```text
//! ┌─────────┬──────────────────────────────┐
//! │ COMMAND │ PAYLOAD                      │
//! │ 1B      │ 0, 5 or 10 password digits   │
//! └─────────┴──────────────────────────────┘
//! ```
//!
//! The control unit answers with a single status byte. The exchange is
//! strictly half-duplex: a new command is only sent once the previous reply
//! has been read. The door cycle is the one exception where the control unit
//! sends several bytes (one heartbeat per door phase) for one command.
//!
//! | Byte   | Direction          | Payload | Meaning                          |
//! |--------|--------------------|---------|----------------------------------|
//! | `0x02` | terminal → control | 10      | Define password (entry + repeat) |
//! | `0x03` | terminal → control | 5       | Check password                   |
//! | `0x04` | both               | 0       | Open door / door heartbeat       |
//! | `0xF0` | terminal → control | 0       | Breach (third failed attempt)    |
//! | `0xFF` | control → terminal | 0       | Boot: a password is stored       |
//! | `0x00` | control → terminal | 0       | Negative acknowledgement         |

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod command;
pub mod parser;
pub mod password;
pub mod reply;

pub use command::{Command, Request, MAX_REQUEST_SIZE};
pub use parser::{ParseError, RequestParser};
pub use password::{Password, PasswordError, PASSWORD_LEN};
pub use reply::{Reply, REPLY_DOOR_HEARTBEAT};
