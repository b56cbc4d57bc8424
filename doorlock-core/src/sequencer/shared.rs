//! Lock-protected door
//!
//! The periodic tick and the command loop both touch the sequencer. `Door`
//! keeps the sequencer and the motor under one blocking mutex, so a phase
//! change and the matching motor command always happen together.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

use super::door::{DoorPhase, DoorSequencer, MotorCommand, PhaseEdge, SequencerError};
use crate::config::DoorTiming;
use crate::traits::{DoorMotor, MotorError};

struct DoorInner<Mo> {
    sequencer: DoorSequencer,
    motor: Mo,
    fault: Option<MotorError>,
}

impl<Mo: DoorMotor> DoorInner<Mo> {
    fn apply(&mut self, command: MotorCommand) {
        if command.is_stop() {
            self.motor.stop();
            return;
        }
        if let Err(e) = self.motor.drive(command.direction, command.speed_percent) {
            self.motor.stop();
            self.fault = Some(e);
        }
    }
}

/// Door sequencer and motor shared between tasks
pub struct Door<M: RawMutex, Mo> {
    inner: Mutex<M, RefCell<DoorInner<Mo>>>,
}

impl<M: RawMutex, Mo: DoorMotor> Door<M, Mo> {
    /// Create an idle door
    pub const fn new(timing: DoorTiming, motor: Mo) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(DoorInner {
                sequencer: DoorSequencer::new(timing),
                motor,
                fault: None,
            })),
        }
    }

    /// Start a door cycle and start the motor
    ///
    /// The caller reports the returned edge to the terminal.
    pub fn arm(&self) -> Result<PhaseEdge, SequencerError> {
        self.inner.lock(|cell| {
            let mut inner = cell.borrow_mut();
            let edge = inner.sequencer.arm()?;
            inner.apply(edge.motor);
            Ok(edge)
        })
    }

    /// Advance one tick, driving the motor on a phase edge
    pub fn tick(&self) -> Option<PhaseEdge> {
        self.inner.lock(|cell| {
            let mut inner = cell.borrow_mut();
            let edge = inner.sequencer.tick()?;
            inner.apply(edge.motor);
            Some(edge)
        })
    }

    /// Current phase
    pub fn phase(&self) -> DoorPhase {
        self.inner.lock(|cell| cell.borrow().sequencer.phase())
    }

    /// Ticks since arming
    pub fn ticks(&self) -> u16 {
        self.inner.lock(|cell| cell.borrow().sequencer.ticks())
    }

    /// Check if a cycle is running
    pub fn is_armed(&self) -> bool {
        self.inner.lock(|cell| cell.borrow().sequencer.is_armed())
    }

    /// Take the last motor error, if any
    pub fn take_motor_fault(&self) -> Option<MotorError> {
        self.inner.lock(|cell| cell.borrow_mut().fault.take())
    }

    /// Run a closure against the motor
    pub fn inspect_motor<R>(&self, f: impl FnOnce(&Mo) -> R) -> R {
        self.inner.lock(|cell| f(&cell.borrow().motor))
    }
}
