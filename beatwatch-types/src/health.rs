//! Service health classification.

use chrono::{DateTime, Utc};

/// Health status for a monitored service.
///
/// Variants are ordered from best to worst, so the worst of several
/// statuses is simply their `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum HealthStatus {
    #[default]
    Healthy,
    Warning,
    Critical,
}

impl HealthStatus {
    /// Returns a short symbol for display.
    pub fn symbol(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "OK",
            HealthStatus::Warning => "WARN",
            HealthStatus::Critical => "CRIT",
        }
    }

    /// Returns the lowercase name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::Warning => "warning",
            HealthStatus::Critical => "critical",
        }
    }
}

impl core::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of one service's health at the end of analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServiceStatus {
    pub service: String,
    pub status: HealthStatus,

    /// Last real heartbeat consumed before analysis stopped.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub last_heartbeat: Option<DateTime<Utc>>,

    /// Consecutive expected slots without a heartbeat.
    pub consecutive_misses: u32,

    /// The slot after the one at which analysis stopped.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub next_expected: Option<DateTime<Utc>>,
}

impl ServiceStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }
}
