//! Door motor trait
//!
//! The door is driven by a DC motor behind an H-bridge: one direction
//! opens, the other closes. There is no position feedback.

/// Rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Opening direction
    #[default]
    Clockwise,
    /// Closing direction
    CounterClockwise,
}

impl Direction {
    /// The opposite direction
    pub fn reversed(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// Errors that can occur with motor operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorError {
    /// Speed above 100%
    InvalidSpeed,
    /// Driver rejected the command
    Fault,
}

/// Door motor driver
pub trait DoorMotor {
    /// Run the motor in `direction` at `speed_percent` (0-100)
    fn drive(&mut self, direction: Direction, speed_percent: u8) -> Result<(), MotorError>;

    /// Stop the motor
    fn stop(&mut self);

    /// Check if the motor is currently running
    fn is_running(&self) -> bool;

    /// Check if the motor is fully stopped
    fn is_stopped(&self) -> bool {
        !self.is_running()
    }
}
