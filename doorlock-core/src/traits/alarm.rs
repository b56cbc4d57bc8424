//! Alarm output trait

/// Audible alarm (buzzer)
pub trait Alarm {
    /// Switch the alarm on or off
    fn set_active(&mut self, active: bool);

    /// Check if the alarm is sounding
    fn is_active(&self) -> bool;

    /// Start sounding
    fn on(&mut self) {
        self.set_active(true);
    }

    /// Stop sounding
    fn off(&mut self) {
        self.set_active(false);
    }
}
