//! GPIO pin abstractions
//!
//! Digital input and output pins implemented by the chip-specific HALs.
//! Keypad rows, H-bridge direction inputs and the buzzer are all plain
//! output pins; keypad columns are pulled-up inputs.

/// Digital output pin
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently driven high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently driven low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Output pin wired active-low
///
/// `set_high` drives the underlying pin low and vice versa, so drivers can
/// always think in "asserted" terms. Matches the `!` prefix used for pins
/// in board descriptions.
#[derive(Debug)]
pub struct ActiveLow<P>(pub P);

impl<P> ActiveLow<P> {
    /// Release the wrapped pin
    pub fn into_inner(self) -> P {
        self.0
    }
}

impl<P: OutputPin> OutputPin for ActiveLow<P> {
    fn set_high(&mut self) {
        self.0.set_low();
    }

    fn set_low(&mut self) {
        self.0.set_high();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_low()
    }
}

impl<P: InputPin> InputPin for ActiveLow<P> {
    fn is_high(&self) -> bool {
        self.0.is_low()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockPin {
        high: bool,
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) {
            self.high = true;
        }

        fn set_low(&mut self) {
            self.high = false;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    impl InputPin for MockPin {
        fn is_high(&self) -> bool {
            self.high
        }
    }

    #[test]
    fn test_set_state() {
        let mut pin = MockPin { high: false };
        pin.set_state(true);
        assert!(pin.is_set_high());
        pin.set_state(false);
        assert!(pin.is_set_low());
    }

    #[test]
    fn test_active_low_output_inverts() {
        let mut pin = ActiveLow(MockPin { high: true });
        pin.set_high();
        assert!(pin.is_set_high());
        assert!(!pin.0.high);

        pin.set_low();
        assert!(pin.is_set_low());
        assert!(pin.into_inner().high);
    }

    #[test]
    fn test_active_low_input_inverts() {
        let pin = ActiveLow(MockPin { high: false });
        assert!(pin.is_high());
        assert!(!pin.is_low());
    }
}
