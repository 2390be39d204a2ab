//! Error types for configuration, sources and record validation.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Whole-run configuration errors. These abort a run before any record is looked at.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Expected interval of zero would never advance the cursor.
    #[error("expected interval must be greater than zero")]
    ZeroInterval,

    /// Interval cannot be added to a calendar instant.
    #[error("expected interval {0:?} is too large")]
    IntervalOutOfRange(Duration),

    #[error("allowed misses must be at least 1")]
    ZeroAllowedMisses,

    /// A duration string in the settings could not be parsed.
    #[error("invalid duration {value:?}: {reason}")]
    InvalidDuration { value: String, reason: String },

    /// Settings file or environment could not be loaded.
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),
}

/// Errors raised while loading raw records from a source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The JSON document parsed but its root is not an array.
    #[error("JSON root must be an array of heartbeat events, found {0}")]
    NotAnArray(&'static str),

    #[error("unknown fixture {0:?}")]
    UnknownFixture(String),
}

/// Why a raw record was rejected by validation.
///
/// Rejections are never surfaced to callers of the batch processor; they are
/// counted and logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("record is not an object (found {0})")]
    NotAnObject(&'static str),

    #[error("record has no service")]
    MissingService,

    /// `service` is present but not a non-empty string.
    #[error("service must be a non-empty string")]
    InvalidService,

    #[error("record has no timestamp")]
    MissingTimestamp,

    #[error("timestamp {0:?} is not a valid instant")]
    InvalidTimestamp(String),
}
