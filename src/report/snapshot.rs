//! Reading and writing `report.json`.
//!
//! Snapshots are written with sorted keys and 4-space indentation, so two
//! runs over identical site data produce byte-identical files.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::report::types::UsageReport;

/// Name of the snapshot file, written to the working directory.
pub const REPORT_FILENAME: &str = "report.json";

pub fn write_report(path: &Path, report: &UsageReport, verbose: bool) -> Result<()> {
    let document = report.to_value(verbose)?;
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    document
        .serialize(&mut serializer)
        .context("Failed to serialize report snapshot")?;
    buffer.push(b'\n');
    fs::write(path, buffer).with_context(|| format!("Failed to write {}", path.display()))
}

pub fn read_report(path: &Path) -> Result<UsageReport> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Did not find report snapshot {}", path.display()))?;
    let document: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("Could not parse report snapshot {}", path.display()))?;
    UsageReport::from_value(document)
}

#[cfg(test)]
#[path = "tests/snapshot_tests.rs"]
mod tests;
