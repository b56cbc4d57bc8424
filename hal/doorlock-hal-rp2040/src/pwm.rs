//! PWM slice adapter
//!
//! One RP2040 PWM slice drives the H-bridge enable line through either of
//! its two channels.

use doorlock_hal::pwm::compare_for_percent;
use embassy_rp::pwm::{Config, Pwm};

/// Counter top; ~1.9 kHz at the default 125 MHz system clock
pub const PWM_TOP: u16 = u16::MAX;

/// Which output of the slice is wired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PwmChannel {
    A,
    B,
}

/// One channel of an RP2040 PWM slice
pub struct RpPwm<'d> {
    pwm: Pwm<'d>,
    config: Config,
    channel: PwmChannel,
    duty: u8,
}

impl<'d> RpPwm<'d> {
    /// Take over a slice, starting with the output off
    pub fn new(mut pwm: Pwm<'d>, channel: PwmChannel) -> Self {
        let mut config = Config::default();
        config.top = PWM_TOP;
        config.compare_a = 0;
        config.compare_b = 0;
        pwm.set_config(&config);
        Self {
            pwm,
            config,
            channel,
            duty: 0,
        }
    }
}

impl doorlock_hal::PwmOutput for RpPwm<'_> {
    fn set_duty_percent(&mut self, percent: u8) {
        let percent = percent.min(100);
        let compare = compare_for_percent(percent, self.config.top);
        match self.channel {
            PwmChannel::A => self.config.compare_a = compare,
            PwmChannel::B => self.config.compare_b = compare,
        }
        self.pwm.set_config(&self.config);
        self.duty = percent;
    }

    fn duty_percent(&self) -> u8 {
        self.duty
    }
}
