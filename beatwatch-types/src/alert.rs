//! Alerts raised when a service crosses its miss threshold.

use chrono::{DateTime, Utc};

/// A one-time notification that a service went silent for too long.
///
/// `alert_at` is the expected slot at which the allowed-miss threshold was
/// reached, not the moment the batch was analyzed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Alert {
    pub service: String,
    pub alert_at: DateTime<Utc>,
}

impl Alert {
    pub fn new(service: impl Into<String>, alert_at: DateTime<Utc>) -> Self {
        Self {
            service: service.into(),
            alert_at,
        }
    }
}
