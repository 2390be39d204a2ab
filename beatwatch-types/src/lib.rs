//! # beatwatch-types
//!
//! Core types for heartbeat gap detection. This crate defines the values that
//! flow out of a beatwatch run: validated heartbeat events, alerts, per-service
//! health snapshots and the aggregated batch result.
//!
//! ## Design Goals
//!
//! - **Small dependency surface**: only `chrono` for instants
//! - **Optional serialization**: enable the `serde` feature to read and write JSON
//! - **Stable wire shape**: field names are `snake_case`, instants are RFC 3339 UTC
//!
//! ## Features
//!
//! - `serde`: JSON/YAML/etc. serialization via serde (also enables `chrono/serde`)
//!
//! ## Example
//!
//! ```rust
//! use beatwatch_types::{Alert, HealthStatus, ProcessedResult, ServiceStatus};
//! use chrono::{TimeZone, Utc};
//!
//! let at = Utc.with_ymd_and_hms(2025, 8, 4, 10, 5, 0).unwrap();
//! let result = ProcessedResult {
//!     alerts: vec![Alert::new("email", at)],
//!     service_statuses: vec![ServiceStatus {
//!         service: "email".to_string(),
//!         status: HealthStatus::Critical,
//!         last_heartbeat: None,
//!         consecutive_misses: 3,
//!         next_expected: None,
//!     }],
//!     malformed_count: 0,
//!     total_input_count: 3,
//! };
//!
//! assert_eq!(result.count_with_status(HealthStatus::Critical), 1);
//! assert!(result.alert_for("email").is_some());
//! ```

mod alert;
mod event;
mod health;
mod result;

pub use alert::*;
pub use event::*;
pub use health::*;
pub use result::*;
