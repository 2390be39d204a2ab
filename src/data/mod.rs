//! Heartbeat gap detection.
//!
//! This module turns a batch of raw records into alerts and per-service
//! health snapshots.
//!
//! ## Submodules
//!
//! - [`validate`]: Raw record validation ([`validate_record`])
//! - [`group`]: Per-service partitioning and ordering ([`group_by_service`])
//! - [`analyze`]: The miss-counting state machine for one service ([`analyze`])
//! - [`process`]: Batch orchestration ([`HeartbeatMonitor`], [`process`])
//! - [`config`]: Per-run configuration ([`MonitorConfig`])
//! - [`duration`]: Parsing and formatting of interval strings (e.g., "60s", "1.5m")
//!
//! ## Data Flow
//!
//! ```text
//! raw records (serde_json::Value)
//!        │
//!        ▼
//! validate_record()  ──▶ malformed_count
//!        │
//!        ▼
//! group_by_service() ──▶ BTreeMap<service, Vec<HeartbeatEvent>> (sorted)
//!        │
//!        ▼
//! analyze() per service ──▶ Option<Alert> + ServiceStatus
//!        │
//!        ▼
//! ProcessedResult
//! ```

pub mod analyze;
pub mod config;
pub mod duration;
pub mod group;
pub mod process;
pub mod validate;

pub use analyze::{analyze, Analysis, WARNING_MISSES};
pub use config::MonitorConfig;
pub use group::{group_by_service, ServiceEvents};
pub use process::{process, HeartbeatMonitor};
pub use validate::{parse_timestamp, validate_record};
