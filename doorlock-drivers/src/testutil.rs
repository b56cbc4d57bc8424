//! Shared mocks for driver tests

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::vec::Vec;

use doorlock_hal::{InputPin, OutputPin, PwmOutput};
use embedded_hal_async::delay::DelayNs;

/// Output pin whose level can be observed through a clone
#[derive(Clone, Default)]
pub struct MockPin {
    level: Rc<Cell<bool>>,
    writes: Rc<Cell<u32>>,
}

impl MockPin {
    pub fn new(high: bool) -> Self {
        let pin = Self::default();
        pin.level.set(high);
        pin
    }

    pub fn level(&self) -> bool {
        self.level.get()
    }

    /// Number of set_high/set_low calls
    pub fn writes(&self) -> u32 {
        self.writes.get()
    }
}

impl OutputPin for MockPin {
    fn set_high(&mut self) {
        self.level.set(true);
        self.writes.set(self.writes.get() + 1);
    }

    fn set_low(&mut self) {
        self.level.set(false);
        self.writes.set(self.writes.get() + 1);
    }

    fn is_set_high(&self) -> bool {
        self.level.get()
    }
}

impl InputPin for MockPin {
    fn is_high(&self) -> bool {
        self.level.get()
    }
}

/// PWM channel that remembers its duty
#[derive(Clone, Default)]
pub struct MockPwm {
    duty: Rc<Cell<u8>>,
}

impl MockPwm {
    pub fn duty(&self) -> u8 {
        self.duty.get()
    }
}

impl PwmOutput for MockPwm {
    fn set_duty_percent(&mut self, percent: u8) {
        self.duty.set(percent.min(100));
    }

    fn duty_percent(&self) -> u8 {
        self.duty.get()
    }
}

/// Delay that returns immediately and logs what was asked for
#[derive(Clone, Default)]
pub struct MockDelay {
    log: Rc<RefCell<Vec<u32>>>,
}

impl MockDelay {
    /// Every delay requested, in microseconds
    pub fn log_us(&self) -> Vec<u32> {
        self.log.borrow().clone()
    }

    pub fn total_us(&self) -> u64 {
        self.log.borrow().iter().map(|&us| u64::from(us)).sum()
    }
}

impl DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.log.borrow_mut().push(ns.div_ceil(1000));
    }

    async fn delay_us(&mut self, us: u32) {
        self.log.borrow_mut().push(us);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.log.borrow_mut().push(ms.saturating_mul(1000));
    }
}
