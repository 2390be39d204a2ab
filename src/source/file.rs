//! File-based record source.
//!
//! Reads a JSON array of heartbeat records from a file, or from stdin when the
//! path is `-`.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::{into_records, EventSource};
use crate::error::SourceError;

/// Path that selects stdin instead of a file.
pub const STDIN_PATH: &str = "-";

/// A source that reads a batch of records from a JSON file.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = if path == Path::new(STDIN_PATH) {
            "stdin".to_string()
        } else {
            format!("file: {}", path.display())
        };
        Self { path, description }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_content(&self) -> Result<String, SourceError> {
        let read_error = |source: std::io::Error| SourceError::Read {
            path: self.path.clone(),
            source,
        };

        if self.path == Path::new(STDIN_PATH) {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .map_err(read_error)?;
            Ok(content)
        } else {
            fs::read_to_string(&self.path).map_err(read_error)
        }
    }
}

impl EventSource for FileSource {
    fn load(&mut self) -> Result<Vec<Value>, SourceError> {
        let content = self.read_content()?;
        parse_records(&content)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Parse a JSON document whose root must be an array of records.
pub fn parse_records(content: &str) -> Result<Vec<Value>, SourceError> {
    into_records(serde_json::from_str(content)?)
}
