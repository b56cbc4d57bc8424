//! Lockout policy implementation

use crate::config::LockoutConfig;

/// Consecutive failures before a breach
pub const DEFAULT_MAX_FAILURES: u8 = 3;

/// Outcome after recording an attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LockoutStatus {
    /// Entry may continue; `remaining` failures left before a breach
    Ok { remaining: u8 },
    /// Threshold reached; the breach response must run
    Breach,
}

/// Consecutive failure counter
///
/// The counter strictly increments on every failure and drops to zero on
/// any success. Once it reaches the threshold it stays there until
/// `breach_handled` is called after the breach response completes.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LockoutPolicy {
    failures: u8,
    max_failures: u8,
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FAILURES)
    }
}

impl LockoutPolicy {
    /// Create a policy that breaches after `max_failures` failures
    pub fn new(max_failures: u8) -> Self {
        Self {
            failures: 0,
            max_failures: max_failures.max(1),
        }
    }

    /// Create a policy from configuration
    pub fn from_config(config: &LockoutConfig) -> Self {
        Self::new(config.max_failures)
    }

    /// Record a failed attempt
    pub fn record_failure(&mut self) -> LockoutStatus {
        self.failures = self.failures.saturating_add(1).min(self.max_failures);
        self.status()
    }

    /// Record a successful attempt
    pub fn record_success(&mut self) {
        self.failures = 0;
    }

    /// Clear the counter once the breach response has completed
    pub fn breach_handled(&mut self) {
        self.failures = 0;
    }

    /// Current status
    pub fn status(&self) -> LockoutStatus {
        if self.failures >= self.max_failures {
            LockoutStatus::Breach
        } else {
            LockoutStatus::Ok {
                remaining: self.max_failures - self.failures,
            }
        }
    }

    /// Check if the breach threshold has been reached
    pub fn is_breached(&self) -> bool {
        self.status() == LockoutStatus::Breach
    }

    /// Number of consecutive failures
    pub fn failures(&self) -> u8 {
        self.failures
    }

    /// Configured threshold
    pub fn max_failures(&self) -> u8 {
        self.max_failures
    }
}
