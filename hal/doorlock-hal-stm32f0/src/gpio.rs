//! GPIO adapters for STM32F0
//!
//! Keypad rows are push-pull outputs; columns are inputs with pull-ups.

use embassy_stm32::gpio::{Input, Output};

/// Push-pull output pin
pub struct StmOutput<'d>(Output<'d>);

impl<'d> StmOutput<'d> {
    /// Wrap a configured output
    pub fn new(pin: Output<'d>) -> Self {
        Self(pin)
    }
}

impl doorlock_hal::OutputPin for StmOutput<'_> {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}

/// Input pin
pub struct StmInput<'d>(Input<'d>);

impl<'d> StmInput<'d> {
    /// Wrap a configured input
    pub fn new(pin: Input<'d>) -> Self {
        Self(pin)
    }
}

impl doorlock_hal::InputPin for StmInput<'_> {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}
