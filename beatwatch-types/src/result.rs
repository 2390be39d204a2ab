//! ProcessedResult - the aggregated outcome of one batch run.

use crate::{Alert, HealthStatus, ServiceStatus};

/// Everything a single processing run produces.
///
/// Alerts and statuses are both ordered by service identifier.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProcessedResult {
    pub alerts: Vec<Alert>,

    /// One entry per distinct service with at least one valid event.
    pub service_statuses: Vec<ServiceStatus>,

    /// Records rejected by validation.
    pub malformed_count: usize,

    /// Length of the raw input batch.
    pub total_input_count: usize,
}

impl ProcessedResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records that passed validation.
    pub fn valid_count(&self) -> usize {
        self.total_input_count.saturating_sub(self.malformed_count)
    }

    /// Number of services whose final status is `status`.
    pub fn count_with_status(&self, status: HealthStatus) -> usize {
        self.service_statuses
            .iter()
            .filter(|s| s.status == status)
            .count()
    }

    /// Look up the alert raised for a service, if any.
    pub fn alert_for(&self, service: &str) -> Option<&Alert> {
        self.alerts.iter().find(|a| a.service == service)
    }

    /// Look up the final status of a service.
    pub fn status_for(&self, service: &str) -> Option<&ServiceStatus> {
        self.service_statuses.iter().find(|s| s.service == service)
    }

    pub fn has_alerts(&self) -> bool {
        !self.alerts.is_empty()
    }
}
