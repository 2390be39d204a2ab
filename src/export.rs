//! Report export: summary counts plus the full processed result.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use beatwatch_types::{HealthStatus, ProcessedResult};
use serde::Serialize;

/// Aggregate counts over one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_input_count: usize,
    pub valid_count: usize,
    pub malformed_count: usize,
    pub services: usize,
    pub healthy: usize,
    pub warning: usize,
    pub critical: usize,
    pub alerts: usize,
}

impl Summary {
    pub fn from_result(result: &ProcessedResult) -> Self {
        Self {
            total_input_count: result.total_input_count,
            valid_count: result.valid_count(),
            malformed_count: result.malformed_count,
            services: result.service_statuses.len(),
            healthy: result.count_with_status(HealthStatus::Healthy),
            warning: result.count_with_status(HealthStatus::Warning),
            critical: result.count_with_status(HealthStatus::Critical),
            alerts: result.alerts.len(),
        }
    }
}

/// The exported document.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub summary: Summary,
    pub result: &'a ProcessedResult,
}

impl<'a> Report<'a> {
    pub fn new(result: &'a ProcessedResult) -> Self {
        Self {
            summary: Summary::from_result(result),
            result,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize report")
    }
}

/// Write the full report for `result` to `path` as pretty JSON.
pub fn export_to_file(result: &ProcessedResult, path: &Path) -> Result<()> {
    let json = Report::new(result).to_json()?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
