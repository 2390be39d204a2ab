//! Per-run monitor configuration.

use std::time::Duration;

use crate::error::ConfigError;

/// Settings for a single processing run.
///
/// Construct with [`MonitorConfig::new`] to get validation up front; the batch
/// processor re-validates anyway, so a hand-built value can't slip through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Maximum allowed gap between consecutive on-time heartbeats.
    pub expected_interval: Duration,
    /// Consecutive missed slots that trigger an alert.
    pub allowed_misses: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            expected_interval: Duration::from_secs(60),
            allowed_misses: 3,
        }
    }
}

impl MonitorConfig {
    /// Create a validated config.
    pub fn new(expected_interval: Duration, allowed_misses: u32) -> Result<Self, ConfigError> {
        let config = Self {
            expected_interval,
            allowed_misses,
        };
        config.validate()?;
        Ok(config)
    }

    /// Shorthand for whole-second intervals, the unit the CLI speaks.
    pub fn from_secs(expected_interval_seconds: u64, allowed_misses: u32) -> Result<Self, ConfigError> {
        Self::new(Duration::from_secs(expected_interval_seconds), allowed_misses)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.interval().map(|_| ())?;
        if self.allowed_misses < 1 {
            return Err(ConfigError::ZeroAllowedMisses);
        }
        Ok(())
    }

    /// The interval as a calendar offset.
    pub(crate) fn interval(&self) -> Result<chrono::TimeDelta, ConfigError> {
        if self.expected_interval.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }
        chrono::TimeDelta::from_std(self.expected_interval)
            .map_err(|_| ConfigError::IntervalOutOfRange(self.expected_interval))
    }
}
