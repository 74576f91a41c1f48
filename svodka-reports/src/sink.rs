//! File sink for finished reports.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

/// Serialize a finished report and write it to `path` as pretty JSON.
///
/// Aggregation stays pure; writing the result out is this explicit step.
pub fn write_report<T: Serialize>(report: &T, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(report).context("serializing report")?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    tracing::info!(path = %path.display(), "report written");
    Ok(())
}
