//! Output formatting and persistence for machine health results.
//!
//! Supports the plain console report, JSON serialization, and CSV append.

use anyhow::Result;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::monitor::factory::MachineHealth;
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

/// Prints the health report to stdout, one machine per block:
/// the score to two decimal places, then one indented line per alert.
pub fn print_report(results: &IndexMap<String, MachineHealth>) {
    for (machine_id, result) in results {
        println!("Machine {} Health: {:.2}", machine_id, result.health);
        for alert in &result.alerts {
            println!("  ALERT: {}", alert);
        }
    }
}

/// Prints the health report as pretty-printed JSON to stdout.
pub fn print_json(results: &IndexMap<String, MachineHealth>) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(results)?);
    Ok(())
}

/// One machine's result flattened for CSV export.
#[derive(Debug, Serialize)]
pub struct HealthRecord {
    pub timestamp: DateTime<Utc>,
    pub machine_id: String,
    pub health: f64,
    pub alerts: String,
}

impl HealthRecord {
    pub fn new(timestamp: DateTime<Utc>, machine_id: &str, result: &MachineHealth) -> Self {
        Self {
            timestamp,
            machine_id: machine_id.to_string(),
            health: result.health,
            alerts: result.alerts.join("; "),
        }
    }
}

/// Appends a [`HealthRecord`] as a row to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record(path: &Path, record: &HealthRecord) -> Result<()> {
    let file_exists = path.exists();
    debug!(path = %path.display(), file_exists, "Appending CSV record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    writer.serialize(record)?;
    writer.flush()?;

    Ok(())
}
