//! PWM output abstraction
//!
//! The door motor's H-bridge enable line is driven by one PWM channel.
//! Duty is expressed in percent; chip HALs scale it to their counter.

/// Single PWM channel
pub trait PwmOutput {
    /// Set the duty cycle, clamped to 0-100
    fn set_duty_percent(&mut self, percent: u8);

    /// Current duty cycle in percent
    fn duty_percent(&self) -> u8;

    /// Drive the channel fully off
    fn disable(&mut self) {
        self.set_duty_percent(0);
    }

    /// Drive the channel fully on
    fn full_on(&mut self) {
        self.set_duty_percent(100);
    }
}

/// Scale a percentage onto a counter with the given top value
///
/// Percentages above 100 are clamped. The result never exceeds `top`.
pub fn compare_for_percent(percent: u8, top: u16) -> u16 {
    let percent = u32::from(percent.min(100));
    // top * 100 fits in u32
    ((u32::from(top) * percent) / 100) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_for_percent() {
        assert_eq!(compare_for_percent(0, 1000), 0);
        assert_eq!(compare_for_percent(50, 1000), 500);
        assert_eq!(compare_for_percent(100, 1000), 1000);
        assert_eq!(compare_for_percent(100, u16::MAX), u16::MAX);
    }

    #[test]
    fn test_compare_clamps_above_full() {
        assert_eq!(compare_for_percent(150, 1000), 1000);
    }
}
