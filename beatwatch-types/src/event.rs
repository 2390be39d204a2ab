//! Validated heartbeat events.

use chrono::{DateTime, Utc};

/// A single liveness signal from a named service.
///
/// Instances only come out of record validation, so `service` is never
/// empty and `timestamp` is always a real instant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeartbeatEvent {
    /// Identifier of the service that emitted the heartbeat.
    pub service: String,

    /// When the heartbeat was emitted.
    pub timestamp: DateTime<Utc>,
}

impl HeartbeatEvent {
    /// Create a new event.
    pub fn new(service: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            service: service.into(),
            timestamp,
        }
    }
}
