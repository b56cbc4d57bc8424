//! Terminal (HMI) states

/// Heartbeats the control unit sends for one door cycle
pub const DOOR_HEARTBEATS: u8 = 4;

/// Terminal states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HmiState {
    /// Prompt shown, waiting for the boot byte
    #[default]
    Booting,
    /// Collecting the first (or only) entry
    Entering,
    /// Collecting the confirmation of a new password
    ReEntering,
    /// Define sent, waiting for the reply
    AwaitingDefine,
    /// Check sent, waiting for the reply
    AwaitingCheck,
    /// Mismatch or incorrect message shown
    Message,
    /// Breach screen shown, alarm dwell running
    Breach,
    /// Open door / change password menu
    Menu,
    /// Door cycle running; holds the number of bytes read so far
    DoorCycle(u8),
}

/// Events that move the terminal between states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HmiEvent {
    /// Boot byte received
    BootStatus,
    /// Five digits confirmed with `=`
    Submit {
        /// Control unit holds a password
        on_record: bool,
    },
    /// Reply confirmed the request
    Accepted,
    /// Reply rejected the request
    Rejected,
    /// Message dwell finished
    MessageElapsed,
    /// Failure threshold reached after the message dwell
    BreachRaised,
    /// Alarm dwell finished
    BreachElapsed,
    /// `+` pressed in the menu
    OpenDoor,
    /// `-` pressed in the menu
    ChangePassword,
    /// One byte read during the door cycle
    DoorByte,
}

impl HmiState {
    /// Process an event and return the next state
    pub fn transition(self, event: HmiEvent) -> Self {
        use HmiEvent::*;
        use HmiState::*;

        match (self, event) {
            (Booting, BootStatus) => Entering,

            (Entering, Submit { on_record: false }) => ReEntering,
            (Entering, Submit { on_record: true }) => AwaitingCheck,
            (ReEntering, Submit { .. }) => AwaitingDefine,

            (AwaitingDefine | AwaitingCheck, Accepted) => Menu,
            (AwaitingDefine | AwaitingCheck, Rejected) => Message,

            (Message, MessageElapsed) => Entering,
            (Message, BreachRaised) => Breach,
            (Breach, BreachElapsed) => Entering,

            (Menu, OpenDoor) => DoorCycle(0),
            (Menu, ChangePassword) => Entering,

            (DoorCycle(read), DoorByte) if read + 1 >= DOOR_HEARTBEATS => Entering,
            (DoorCycle(read), DoorByte) => DoorCycle(read + 1),

            _ => self,
        }
    }

    /// Check if keypad digits are collected in this state
    pub fn accepts_digits(&self) -> bool {
        matches!(self, HmiState::Entering | HmiState::ReEntering)
    }

    /// Check if the terminal is blocked on a byte from the control unit
    pub fn awaits_reply(&self) -> bool {
        matches!(
            self,
            HmiState::Booting
                | HmiState::AwaitingDefine
                | HmiState::AwaitingCheck
                | HmiState::DoorCycle(_)
        )
    }
}
