//! Control unit states

use doorlock_protocol::Command;

/// Control unit states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlState {
    /// Scanning the store, boot byte not sent yet
    #[default]
    Boot,
    /// Waiting for the next command byte
    WaitCommand,
    /// Define received, reply or commit pending
    DefiningPassword,
    /// Check received, reply pending
    CheckingPassword,
    /// Open request received, door not armed yet
    OpeningDoor,
    /// Alarm sounding
    Breached,
}

/// Events that move the control unit between states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlEvent {
    /// Boot byte sent
    BootComplete,
    /// A complete request arrived
    Received(Command),
    /// Reply sent, commit finished or door armed
    Handled,
    /// Alarm dwell finished
    AlarmCleared,
}

impl ControlState {
    /// Process an event and return the next state
    pub fn transition(self, event: ControlEvent) -> Self {
        use ControlEvent::*;
        use ControlState::*;

        match (self, event) {
            (Boot, BootComplete) => WaitCommand,

            (WaitCommand, Received(Command::DefinePassword)) => DefiningPassword,
            (WaitCommand, Received(Command::CheckPassword)) => CheckingPassword,
            (WaitCommand, Received(Command::OpenDoor)) => OpeningDoor,
            (WaitCommand, Received(Command::Breach)) => Breached,

            (DefiningPassword | CheckingPassword | OpeningDoor, Handled) => WaitCommand,

            // Nothing interrupts the alarm
            (Breached, AlarmCleared) => WaitCommand,

            _ => self,
        }
    }

    /// Check if the unit is ready for a new command
    pub fn is_waiting(&self) -> bool {
        matches!(self, ControlState::WaitCommand)
    }
}
