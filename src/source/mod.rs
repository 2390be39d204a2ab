//! Sources of raw heartbeat records.
//!
//! This module provides a trait-based abstraction for loading a batch of raw,
//! unvalidated records from various places (JSON files, stdin, built-in
//! fixtures).

mod file;
mod fixtures;

pub use file::FileSource;
pub use fixtures::{Fixture, FixtureSource};

use std::fmt::Debug;

use serde_json::Value;

use crate::error::SourceError;

/// Trait for loading a batch of raw records.
///
/// Records are returned untouched; validation happens in the batch processor
/// so that malformed entries are counted rather than failing the load.
///
/// # Example
///
/// ```
/// use beatwatch::{EventSource, FixtureSource};
///
/// let mut source = FixtureSource::new("near-miss").unwrap();
/// let records = source.load().unwrap();
/// assert_eq!(records.len(), 3);
/// ```
pub trait EventSource: Debug {
    /// Load the whole batch.
    fn load(&mut self) -> Result<Vec<Value>, SourceError>;

    /// Returns a human-readable description of the source.
    fn description(&self) -> &str;
}

/// Require the root of a parsed document to be an array.
pub(crate) fn into_records(document: Value) -> Result<Vec<Value>, SourceError> {
    match document {
        Value::Array(records) => Ok(records),
        Value::Object(_) => Err(SourceError::NotAnArray("an object")),
        Value::String(_) => Err(SourceError::NotAnArray("a string")),
        Value::Number(_) => Err(SourceError::NotAnArray("a number")),
        Value::Bool(_) => Err(SourceError::NotAnArray("a boolean")),
        Value::Null => Err(SourceError::NotAnArray("null")),
    }
}
