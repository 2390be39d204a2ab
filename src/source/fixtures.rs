//! Built-in record batches for demos and smoke tests.

use serde_json::{json, Value};

use super::EventSource;
use crate::error::SourceError;

/// A named, built-in batch of raw records.
#[derive(Debug, Clone, Copy)]
pub struct Fixture {
    pub name: &'static str,
    pub description: &'static str,
    build: fn() -> Vec<Value>,
}

impl Fixture {
    /// All built-in fixtures.
    pub fn all() -> &'static [Fixture] {
        FIXTURES
    }

    /// Look up a fixture by name.
    pub fn find(name: &str) -> Option<&'static Fixture> {
        FIXTURES.iter().find(|f| f.name == name)
    }

    /// Build a fresh copy of the records.
    pub fn records(&self) -> Vec<Value> {
        (self.build)()
    }
}

const FIXTURES: &[Fixture] = &[
    Fixture {
        name: "working-alert",
        description: "Service stops after 10:02 and misses three heartbeats",
        build: working_alert,
    },
    Fixture {
        name: "near-miss",
        description: "Service misses two heartbeats, then recovers",
        build: near_miss,
    },
    Fixture {
        name: "unordered",
        description: "Contiguous heartbeats delivered out of order",
        build: unordered,
    },
    Fixture {
        name: "malformed",
        description: "Valid heartbeats mixed with invalid and incomplete records",
        build: malformed,
    },
    Fixture {
        name: "multi-service",
        description: "Two services interleaved in one batch",
        build: multi_service,
    },
];

fn beat(service: &str, timestamp: &str) -> Value {
    json!({ "service": service, "timestamp": timestamp })
}

fn working_alert() -> Vec<Value> {
    vec![
        beat("email", "2025-08-04T10:00:00Z"),
        beat("email", "2025-08-04T10:01:00Z"),
        beat("email", "2025-08-04T10:02:00Z"),
    ]
}

fn near_miss() -> Vec<Value> {
    vec![
        beat("api", "2025-08-04T10:00:00Z"),
        beat("api", "2025-08-04T10:01:00Z"),
        beat("api", "2025-08-04T10:04:00Z"),
    ]
}

fn unordered() -> Vec<Value> {
    vec![
        beat("db", "2025-08-04T10:02:00Z"),
        beat("db", "2025-08-04T10:00:00Z"),
        beat("db", "2025-08-04T10:04:00Z"),
        beat("db", "2025-08-04T10:01:00Z"),
        beat("db", "2025-08-04T10:03:00Z"),
    ]
}

fn malformed() -> Vec<Value> {
    vec![
        beat("cache", "2025-08-04T10:00:00Z"),
        json!({ "service": "cache" }),
        json!({ "timestamp": "2025-08-04T10:01:00Z" }),
        beat("cache", "invalid-date"),
        Value::Null,
        json!("invalid"),
        json!({}),
        beat("cache", "2025-08-04T10:01:00Z"),
    ]
}

fn multi_service() -> Vec<Value> {
    vec![
        beat("email", "2025-08-04T10:00:00Z"),
        beat("api", "2025-08-04T10:00:00Z"),
        beat("email", "2025-08-04T10:01:00Z"),
        beat("api", "2025-08-04T10:01:00Z"),
    ]
}

/// A source that serves one of the built-in fixtures.
#[derive(Debug)]
pub struct FixtureSource {
    fixture: &'static Fixture,
    description: String,
}

impl FixtureSource {
    pub fn new(name: &str) -> Result<Self, SourceError> {
        let fixture =
            Fixture::find(name).ok_or_else(|| SourceError::UnknownFixture(name.to_string()))?;
        Ok(Self {
            fixture,
            description: format!("fixture: {}", fixture.name),
        })
    }

    pub fn fixture(&self) -> &'static Fixture {
        self.fixture
    }
}

impl EventSource for FixtureSource {
    fn load(&mut self) -> Result<Vec<Value>, SourceError> {
        Ok(self.fixture.records())
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique() {
        let mut names: Vec<_> = Fixture::all().iter().map(|f| f.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Fixture::all().len());
    }

    #[test]
    fn unknown_fixture_is_an_error() {
        let err = FixtureSource::new("nope").unwrap_err();
        assert!(matches!(err, SourceError::UnknownFixture(ref n) if n == "nope"));
    }

    #[test]
    fn malformed_fixture_loads_every_record() {
        let mut source = FixtureSource::new("malformed").unwrap();
        assert_eq!(source.description(), "fixture: malformed");
        assert_eq!(source.load().unwrap().len(), 8);
    }
}
