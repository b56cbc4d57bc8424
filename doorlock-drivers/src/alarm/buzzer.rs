//! GPIO buzzer
//!
//! An active buzzer switched by one GPIO pin, directly or through a
//! transistor. Boards that sink the buzzer current wrap the pin in
//! [`ActiveLow`].

use doorlock_core::traits::Alarm;
use doorlock_hal::{ActiveLow, OutputPin};

/// Buzzer alarm output
pub struct Buzzer<P> {
    pin: P,
    /// Current logical state (true = sounding)
    active: bool,
}

impl<P: OutputPin> Buzzer<P> {
    /// Create a buzzer on an active-high pin; starts silent
    pub fn new(pin: P) -> Self {
        let mut buzzer = Self { pin, active: false };
        buzzer.set_active(false);
        buzzer
    }

    /// Release the pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> Buzzer<ActiveLow<P>> {
    /// Create a buzzer that sounds while the pin is low
    pub fn new_active_low(pin: P) -> Self {
        Self::new(ActiveLow(pin))
    }
}

impl<P: OutputPin> Alarm for Buzzer<P> {
    fn set_active(&mut self, active: bool) {
        self.active = active;
        self.pin.set_state(active);
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::MockPin;

    #[test]
    fn test_active_high_buzzer() {
        let pin = MockPin::new(true);
        let mut buzzer = Buzzer::new(pin.clone());

        // Initially silent, driven low once at construction
        assert!(!buzzer.is_active());
        assert!(!pin.level());
        assert_eq!(pin.writes(), 1);

        buzzer.on();
        assert!(buzzer.is_active());
        assert!(pin.level());

        buzzer.off();
        assert!(!buzzer.is_active());
        assert!(!pin.level());
        assert_eq!(pin.writes(), 3);
    }

    #[test]
    fn test_active_low_buzzer() {
        let pin = MockPin::new(false);
        let mut buzzer = Buzzer::new_active_low(pin.clone());

        // Initially silent (pin is high for active-low)
        assert!(!buzzer.is_active());
        assert!(pin.level());

        buzzer.on();
        assert!(buzzer.is_active());
        assert!(!pin.level());

        buzzer.off();
        assert!(pin.level());
    }

    #[test]
    fn test_alarm_trait() {
        fn sound<A: Alarm>(alarm: &mut A) {
            assert!(!alarm.is_active());
            alarm.on();
            assert!(alarm.is_active());
        }

        let mut buzzer = Buzzer::new(MockPin::default());
        sound(&mut buzzer);
    }
}
