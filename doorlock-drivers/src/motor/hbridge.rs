//! Door motor behind an H-bridge
//!
//! This driver provides:
//! - Direction control through the bridge's IN1/IN2 inputs
//! - PWM speed control on the bridge enable line (0-100%)
//! - Minimum duty handling (below which the motor won't turn)
//!
//! | Command            | IN1 | IN2 | EN          |
//! |--------------------|-----|-----|-------------|
//! | stop               | 0   | 0   | 0%          |
//! | clockwise          | 1   | 0   | scaled duty |
//! | counter-clockwise  | 0   | 1   | scaled duty |
//!
//! Setting `reversed` swaps the two directions for motors wired the other
//! way round.

use doorlock_core::traits::{Direction, DoorMotor, MotorError};
use doorlock_hal::{OutputPin, PwmOutput};

/// H-bridge configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HBridgeConfig {
    /// Minimum duty cycle percentage (below this the motor won't start)
    pub min_duty: u8,
    /// Swap clockwise and counter-clockwise
    pub reversed: bool,
}

impl Default for HBridgeConfig {
    fn default() -> Self {
        Self {
            min_duty: 0,
            reversed: false,
        }
    }
}

/// DC motor on an H-bridge
pub struct HBridgeMotor<A, B, E> {
    in1: A,
    in2: B,
    enable: E,
    config: HBridgeConfig,
    /// Direction and requested speed while running
    running: Option<(Direction, u8)>,
}

impl<A, B, E> HBridgeMotor<A, B, E>
where
    A: OutputPin,
    B: OutputPin,
    E: PwmOutput,
{
    /// Create the driver; the motor starts stopped
    pub fn new(in1: A, in2: B, enable: E, config: HBridgeConfig) -> Self {
        let mut motor = Self {
            in1,
            in2,
            enable,
            config,
            running: None,
        };
        motor.stop();
        motor
    }

    /// Get the configuration
    pub fn config(&self) -> &HBridgeConfig {
        &self.config
    }

    /// Direction currently driven, if running
    pub fn direction(&self) -> Option<Direction> {
        self.running.map(|(direction, _)| direction)
    }

    /// Requested speed (0 when stopped)
    pub fn speed(&self) -> u8 {
        self.running.map_or(0, |(_, speed)| speed)
    }

    /// Duty currently applied to the enable line
    pub fn duty(&self) -> u8 {
        self.enable.duty_percent()
    }

    /// Scale the speed percentage to actual duty cycle
    ///
    /// Maps 1-100% onto min_duty-100%, so that 0% = off and 100% = full
    /// power, with the dead zone below min_duty skipped.
    fn scale_duty(&self, speed: u8) -> u8 {
        if speed == 0 {
            0
        } else {
            let min = u32::from(self.config.min_duty.min(100));
            let range = 100 - min;
            let scaled = min + (u32::from(speed) * range / 100);
            scaled.min(100) as u8
        }
    }

    fn set_bridge(&mut self, in1: bool, in2: bool) {
        self.in1.set_state(in1);
        self.in2.set_state(in2);
    }
}

impl<A, B, E> DoorMotor for HBridgeMotor<A, B, E>
where
    A: OutputPin,
    B: OutputPin,
    E: PwmOutput,
{
    fn drive(&mut self, direction: Direction, speed_percent: u8) -> Result<(), MotorError> {
        if speed_percent > 100 {
            return Err(MotorError::InvalidSpeed);
        }
        if speed_percent == 0 {
            self.stop();
            return Ok(());
        }

        let wired = if self.config.reversed {
            direction.reversed()
        } else {
            direction
        };

        // Cut power before flipping the bridge
        self.enable.disable();
        match wired {
            Direction::Clockwise => self.set_bridge(true, false),
            Direction::CounterClockwise => self.set_bridge(false, true),
        }
        self.enable.set_duty_percent(self.scale_duty(speed_percent));
        self.running = Some((direction, speed_percent));
        Ok(())
    }

    fn stop(&mut self) {
        self.enable.disable();
        self.set_bridge(false, false);
        self.running = None;
    }

    fn is_running(&self) -> bool {
        self.running.is_some()
    }
}
