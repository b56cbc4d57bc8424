//! Timed door cycle
//!
//! Once armed, the cycle runs on tick count alone:
//!
//! | tick        | phase   | motor            |
//! |-------------|---------|------------------|
//! | 0 (arm)     | Opening | clockwise        |
//! | hold_tick   | Holding | stop             |
//! | close_tick  | Closing | counter-clockwise|
//! | done_tick   | Idle    | stop, disarm     |
//!
//! Every row is a phase edge and is reported to the terminal with one
//! heartbeat byte.

use crate::config::DoorTiming;
use crate::traits::Direction;

/// Door phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DoorPhase {
    /// Not armed, motor stopped
    #[default]
    Idle,
    /// Motor opening the door
    Opening,
    /// Door held open, motor stopped
    Holding,
    /// Motor closing the door
    Closing,
}

/// Motor command attached to a phase edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorCommand {
    /// Duty in percent (0 = stopped)
    pub speed_percent: u8,
    /// Rotation direction
    pub direction: Direction,
}

impl MotorCommand {
    /// Create a stopped command
    pub const fn stopped() -> Self {
        Self {
            speed_percent: 0,
            direction: Direction::Clockwise,
        }
    }

    /// Create a running command
    pub const fn running(speed_percent: u8, direction: Direction) -> Self {
        Self {
            speed_percent,
            direction,
        }
    }

    /// True for a stop command
    pub fn is_stop(&self) -> bool {
        self.speed_percent == 0
    }
}

/// A phase boundary crossed by the sequencer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhaseEdge {
    /// Phase entered at this edge
    pub phase: DoorPhase,
    /// Ticks since arming when the edge fired
    pub tick: u16,
    /// Motor command to apply
    pub motor: MotorCommand,
}

/// Errors from the sequencer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequencerError {
    /// A door cycle is already running
    Busy,
}

/// Door cycle state machine
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DoorSequencer {
    timing: DoorTiming,
    phase: DoorPhase,
    ticks: u16,
}

impl DoorSequencer {
    /// Create an idle sequencer
    pub const fn new(timing: DoorTiming) -> Self {
        Self {
            timing,
            phase: DoorPhase::Idle,
            ticks: 0,
        }
    }

    /// Start a door cycle
    ///
    /// Returns the opening edge (tick 0).
    pub fn arm(&mut self) -> Result<PhaseEdge, SequencerError> {
        if self.is_armed() {
            return Err(SequencerError::Busy);
        }
        self.ticks = 0;
        self.phase = DoorPhase::Opening;
        Ok(self.edge(MotorCommand::running(
            self.timing.speed_percent,
            Direction::Clockwise,
        )))
    }

    /// Advance by one tick
    ///
    /// Returns the edge crossed on this tick, if any. Does nothing while idle.
    pub fn tick(&mut self) -> Option<PhaseEdge> {
        if !self.is_armed() {
            return None;
        }

        self.ticks = self.ticks.saturating_add(1);
        let speed = self.timing.speed_percent;

        let (phase, motor) = if self.ticks == self.timing.hold_tick {
            (DoorPhase::Holding, MotorCommand::stopped())
        } else if self.ticks == self.timing.close_tick {
            (
                DoorPhase::Closing,
                MotorCommand::running(speed, Direction::CounterClockwise),
            )
        } else if self.ticks >= self.timing.done_tick {
            (DoorPhase::Idle, MotorCommand::stopped())
        } else {
            return None;
        };

        self.phase = phase;
        let edge = self.edge(motor);
        if phase == DoorPhase::Idle {
            self.ticks = 0;
        }
        Some(edge)
    }

    fn edge(&self, motor: MotorCommand) -> PhaseEdge {
        PhaseEdge {
            phase: self.phase,
            tick: self.ticks,
            motor,
        }
    }

    /// Current phase
    pub fn phase(&self) -> DoorPhase {
        self.phase
    }

    /// Ticks since arming (0 while idle)
    pub fn ticks(&self) -> u16 {
        self.ticks
    }

    /// Check if a cycle is running
    pub fn is_armed(&self) -> bool {
        self.phase != DoorPhase::Idle
    }

    /// Timing in use
    pub fn timing(&self) -> &DoorTiming {
        &self.timing
    }
}
