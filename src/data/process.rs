//! Batch processing: validation, grouping and per-service analysis.

use beatwatch_types::{HeartbeatEvent, ProcessedResult};
use chrono::TimeDelta;
use serde_json::Value;
use tracing::{debug, warn};

use super::analyze::analyze_service;
use super::config::MonitorConfig;
use super::group::group_by_service;
use super::validate::validate_record;
use crate::error::ConfigError;

/// A heartbeat monitor bound to one validated configuration.
///
/// Holds no state between calls, so one instance can process any number of
/// batches, from any number of threads.
#[derive(Debug, Clone)]
pub struct HeartbeatMonitor {
    config: MonitorConfig,
    interval: TimeDelta,
}

impl HeartbeatMonitor {
    /// Create a monitor, rejecting invalid configuration up front.
    pub fn new(config: MonitorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let interval = config.interval()?;
        Ok(Self { config, interval })
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Process a batch of raw records.
    ///
    /// Malformed records are counted and skipped; they never fail the batch.
    pub fn process(&self, records: &[Value]) -> ProcessedResult {
        let mut malformed_count = 0;
        let valid: Vec<HeartbeatEvent> = records
            .iter()
            .enumerate()
            .filter_map(|(index, record)| match validate_record(record) {
                Ok(event) => Some(event),
                Err(reason) => {
                    debug!(index, %reason, "skipping malformed record");
                    malformed_count += 1;
                    None
                }
            })
            .collect();

        if malformed_count > 0 {
            warn!(malformed_count, total = records.len(), "skipped malformed records");
        }

        let mut result = ProcessedResult {
            malformed_count,
            total_input_count: records.len(),
            ..ProcessedResult::default()
        };

        for events in group_by_service(valid).values() {
            if let Some(analysis) = analyze_service(events, self.interval, self.config.allowed_misses)
            {
                result.alerts.extend(analysis.alert);
                result.service_statuses.push(analysis.status);
            }
        }

        result
    }
}

/// Process a batch of raw records with the given configuration.
///
/// ```
/// use beatwatch::{process, MonitorConfig};
/// use serde_json::json;
///
/// let records = vec![
///     json!({"service": "email", "timestamp": "2025-08-04T10:00:00Z"}),
///     json!({"service": "email", "timestamp": "2025-08-04T10:01:00Z"}),
///     json!(null),
/// ];
/// let result = process(&records, &MonitorConfig::from_secs(60, 3).unwrap()).unwrap();
///
/// assert_eq!(result.malformed_count, 1);
/// assert_eq!(result.alerts.len(), 1);
/// assert_eq!(result.alerts[0].alert_at.to_rfc3339(), "2025-08-04T10:04:00+00:00");
/// ```
pub fn process(records: &[Value], config: &MonitorConfig) -> Result<ProcessedResult, ConfigError> {
    Ok(HeartbeatMonitor::new(*config)?.process(records))
}
