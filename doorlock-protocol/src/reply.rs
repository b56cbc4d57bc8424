//! Status bytes sent by the control unit

// Reply bytes: control → terminal
pub const REPLY_NACK: u8 = 0x00;
pub const REPLY_PASSWORD_DEFINED: u8 = 0x02;
pub const REPLY_PASSWORD_VERIFIED: u8 = 0x03;
pub const REPLY_DOOR_HEARTBEAT: u8 = 0x04;
pub const REPLY_PASSWORD_STORED: u8 = 0xFF;

/// Single-byte replies from the control unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reply {
    /// Mismatch, or no stored password at boot
    Nack,
    /// Define succeeded (echo of the define command)
    PasswordDefined,
    /// Check succeeded (echo of the check command)
    PasswordVerified,
    /// Door crossed a phase boundary
    DoorHeartbeat,
    /// Boot: a password is stored
    PasswordStored,
}

impl Reply {
    /// Parse a reply from its wire byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            REPLY_NACK => Some(Reply::Nack),
            REPLY_PASSWORD_DEFINED => Some(Reply::PasswordDefined),
            REPLY_PASSWORD_VERIFIED => Some(Reply::PasswordVerified),
            REPLY_DOOR_HEARTBEAT => Some(Reply::DoorHeartbeat),
            REPLY_PASSWORD_STORED => Some(Reply::PasswordStored),
            _ => None,
        }
    }

    /// Convert to wire byte
    pub fn to_byte(self) -> u8 {
        match self {
            Reply::Nack => REPLY_NACK,
            Reply::PasswordDefined => REPLY_PASSWORD_DEFINED,
            Reply::PasswordVerified => REPLY_PASSWORD_VERIFIED,
            Reply::DoorHeartbeat => REPLY_DOOR_HEARTBEAT,
            Reply::PasswordStored => REPLY_PASSWORD_STORED,
        }
    }

    /// Reply sent once at boot for the given store state
    pub fn boot_status(password_stored: bool) -> Self {
        if password_stored {
            Reply::PasswordStored
        } else {
            Reply::Nack
        }
    }
}
