//! Configuration type definitions
//!
//! Timing and policy knobs for both units. Defaults match the timing of
//! the stock two-board door locker.

/// Complete configuration shared by the terminal and the control unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LockConfig {
    pub door: DoorTiming,
    pub lockout: LockoutConfig,
    pub ui: UiConfig,
    pub link: LinkConfig,
    pub store: StoreConfig,
}

/// Door cycle timing, in sequencer ticks since arming
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DoorTiming {
    /// Tick at which the motor stops and the door is held open
    pub hold_tick: u16,
    /// Tick at which the motor reverses to close the door
    pub close_tick: u16,
    /// Tick at which the motor stops and the cycle ends
    pub done_tick: u16,
    /// Length of one tick in milliseconds
    pub tick_ms: u32,
    /// Motor duty for both directions (0-100)
    pub speed_percent: u8,
}

impl Default for DoorTiming {
    fn default() -> Self {
        Self {
            hold_tick: 15,
            close_tick: 18,
            done_tick: 33,
            tick_ms: 1000,
            speed_percent: 100,
        }
    }
}

/// Failed-attempt lockout policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LockoutConfig {
    /// Consecutive failures that trigger the breach response
    pub max_failures: u8,
    /// How long the alarm sounds and the terminal stays locked (ms)
    pub alarm_dwell_ms: u32,
}

impl Default for LockoutConfig {
    fn default() -> Self {
        Self {
            max_failures: 3,
            alarm_dwell_ms: 50_000,
        }
    }
}

/// Terminal UI timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UiConfig {
    /// How long "do not match" / "incorrect" stay on screen (ms)
    pub message_ms: u32,
    /// Pause after each accepted digit (ms)
    pub key_settle_ms: u32,
    /// Entry cursor blink half-period (ms)
    pub cursor_blink_ms: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            message_ms: 3000,
            key_settle_ms: 500,
            cursor_blink_ms: 500,
        }
    }
}

/// UART parity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    #[default]
    Even,
    Odd,
}

/// Serial link settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Parity mode
    pub parity: Parity,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            baudrate: 9600,
            parity: Parity::Even,
        }
    }
}

/// Where the password lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreBackend {
    /// External 24Cxx EEPROM on I2C
    #[default]
    Eeprom,
    /// Wear-levelled region of the MCU's own flash
    Flash,
}

/// Password store settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StoreConfig {
    /// Backing storage
    pub backend: StoreBackend,
    /// EEPROM address of slot 0
    pub base_address: u16,
    /// Attempts at writing all slots before giving up
    pub write_attempts: u8,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Eeprom,
            base_address: 0x0001,
            write_attempts: 3,
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Door ticks must satisfy 0 < hold < close < done
    DoorTicksOutOfOrder,
    /// Tick length of zero
    ZeroTick,
    /// Speed above 100%
    SpeedOutOfRange,
    /// Lockout threshold of zero
    ZeroFailureThreshold,
    /// No write attempts allowed
    ZeroWriteAttempts,
    /// Baud rate of zero
    ZeroBaudrate,
}

impl LockConfig {
    /// Check cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        let door = &self.door;
        if !(0 < door.hold_tick && door.hold_tick < door.close_tick && door.close_tick < door.done_tick)
        {
            return Err(ConfigError::DoorTicksOutOfOrder);
        }
        if door.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        if door.speed_percent > 100 {
            return Err(ConfigError::SpeedOutOfRange);
        }
        if self.lockout.max_failures == 0 {
            return Err(ConfigError::ZeroFailureThreshold);
        }
        if self.store.write_attempts == 0 {
            return Err(ConfigError::ZeroWriteAttempts);
        }
        if self.link.baudrate == 0 {
            return Err(ConfigError::ZeroBaudrate);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_board_constants() {
        let config = LockConfig::default();
        assert_eq!(config.door.hold_tick, 15);
        assert_eq!(config.door.close_tick, 18);
        assert_eq!(config.door.done_tick, 33);
        assert_eq!(config.door.speed_percent, 100);
        assert_eq!(config.lockout.max_failures, 3);
        assert_eq!(config.lockout.alarm_dwell_ms, 50_000);
        assert_eq!(config.ui.message_ms, 3000);
        assert_eq!(config.link.baudrate, 9600);
        assert_eq!(config.link.parity, Parity::Even);
        assert_eq!(config.store.base_address, 0x0001);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_door_order() {
        let mut config = LockConfig::default();
        config.door.close_tick = config.door.hold_tick;
        assert_eq!(config.validate(), Err(ConfigError::DoorTicksOutOfOrder));

        let mut config = LockConfig::default();
        config.door.hold_tick = 0;
        assert_eq!(config.validate(), Err(ConfigError::DoorTicksOutOfOrder));
    }

    #[test]
    fn test_validate_limits() {
        let mut config = LockConfig::default();
        config.door.speed_percent = 101;
        assert_eq!(config.validate(), Err(ConfigError::SpeedOutOfRange));

        let mut config = LockConfig::default();
        config.lockout.max_failures = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroFailureThreshold));

        let mut config = LockConfig::default();
        config.store.write_attempts = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroWriteAttempts));
    }
}
