//! # beatwatch
//!
//! Detects services that have gone silent, from a batch of timestamped
//! heartbeat events.
//!
//! Each service is expected to send a heartbeat at least once per configured
//! interval. Events may arrive out of order and may be malformed; malformed
//! records are counted and skipped. A service that misses `allowed_misses`
//! consecutive expected heartbeats raises a single alert, stamped with the
//! expected slot at which the threshold was crossed.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          beatwatch                           │
//! │  ┌─────────┐    ┌──────────┐    ┌──────────┐    ┌─────────┐ │
//! │  │ source  │───▶│ validate │───▶│  group   │───▶│ analyze │ │
//! │  │ (input) │    │ (filter) │    │ (sort)   │    │ (gaps)  │ │
//! │  └─────────┘    └──────────┘    └──────────┘    └────┬────┘ │
//! │                                                      ▼      │
//! │                                          ProcessedResult    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`source`]**: Record loading ([`EventSource`] trait) from JSON files,
//!   stdin and built-in fixtures
//! - **[`data`]**: Validation, grouping, gap analysis and batch processing
//! - **[`settings`]**: Layered configuration (file + `BEATWATCH_*` environment)
//! - **[`export`]**: JSON report with summary counts
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Alert list for a file, 60s interval, 3 allowed misses
//! beatwatch heartbeats.json 60 3
//!
//! # Full result with per-service status, using a built-in fixture
//! beatwatch --fixture near-miss --summary
//! ```
//!
//! ### As a library
//!
//! ```
//! use beatwatch::{HeartbeatMonitor, MonitorConfig};
//! use serde_json::json;
//!
//! let monitor = HeartbeatMonitor::new(MonitorConfig::from_secs(60, 3).unwrap()).unwrap();
//! let result = monitor.process(&[
//!     json!({"service": "db", "timestamp": "2025-08-04T10:00:00Z"}),
//!     json!({"service": "db", "timestamp": "not a date"}),
//! ]);
//!
//! assert_eq!(result.malformed_count, 1);
//! assert_eq!(result.service_statuses.len(), 1);
//! ```

pub mod data;
pub mod error;
pub mod export;
pub mod settings;
pub mod source;

// Re-export main types for convenience
pub use beatwatch_types::{Alert, HealthStatus, HeartbeatEvent, ProcessedResult, ServiceStatus};
pub use data::{analyze, process, Analysis, HeartbeatMonitor, MonitorConfig};
pub use error::{ConfigError, RecordError, SourceError};
pub use settings::Settings;
pub use source::{EventSource, FileSource, Fixture, FixtureSource};
