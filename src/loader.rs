//! CSV ingestion for sensor readings.
//!
//! Validates the readings file eagerly: a malformed source produces a
//! descriptive error and no partial results.

use anyhow::{Context, Result, bail};
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use crate::monitor::machine::Machine;
use crate::monitor::sensor::Sensor;

/// Columns every readings file must carry. Extra columns are ignored and
/// column order does not matter.
static REQUIRED_COLUMNS: &[&str] = &["machine_id", "sensor_id", "sensor_type", "reading"];

/// One row of the readings file.
#[derive(Debug, Deserialize)]
struct ReadingRow {
    machine_id: String,
    sensor_id: String,
    sensor_type: String,
    reading: f64,
}

/// Loads a readings CSV into machines, keyed by machine id in first-seen
/// order.
///
/// Each row adds one sensor to its machine; a later row with the same
/// `(machine_id, sensor_type)` silently replaces the earlier reading.
///
/// # Errors
///
/// Returns an error if the file cannot be read, a required column is
/// absent, a `reading` value is not a number, or the file contains no
/// data rows.
pub fn load_readings(path: &Path) -> Result<IndexMap<String, Machine>> {
    let mut rdr = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open readings file {}", path.display()))?;

    let headers = rdr
        .headers()
        .with_context(|| format!("failed to read header row of {}", path.display()))?;

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .collect();
    if !missing.is_empty() {
        bail!(
            "malformed readings file {}: missing required column(s): {}",
            path.display(),
            missing.join(", ")
        );
    }

    let mut machines: IndexMap<String, Machine> = IndexMap::new();
    let mut row_count = 0usize;

    for result in rdr.deserialize() {
        let row: ReadingRow = result
            .with_context(|| format!("malformed readings file {}", path.display()))?;
        row_count += 1;

        machines
            .entry(row.machine_id.clone())
            .or_insert_with(|| Machine::new(row.machine_id.clone()))
            .add_sensor(Sensor::new(row.sensor_id, row.sensor_type, row.reading));
    }

    if machines.is_empty() {
        bail!(
            "readings file {} contains no sensor readings",
            path.display()
        );
    }

    debug!(
        rows = row_count,
        machines = machines.len(),
        "Readings file loaded"
    );

    Ok(machines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;
    use std::path::PathBuf;

    fn temp_csv(name: &str, content: &str) -> PathBuf {
        let path = env::temp_dir().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_readings_groups_by_machine() {
        let path = temp_csv(
            "factory_monitor_test_load.csv",
            "machine_id,sensor_id,sensor_type,reading\n\
             M1,S1,Temperature,60\n\
             M1,S2,Pressure,100\n\
             M1,S3,Vibration,2\n\
             M2,S4,Temperature,70\n",
        );

        let machines = load_readings(&path).unwrap();
        assert_eq!(machines.len(), 2);
        assert_eq!(machines["M1"].sensors().len(), 3);
        assert_eq!(machines["M2"].sensors().len(), 1);
        assert_eq!(machines["M1"].sensors()["Pressure"].reading(), 100.0);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_readings_preserves_first_seen_order() {
        let path = temp_csv(
            "factory_monitor_test_order.csv",
            "machine_id,sensor_id,sensor_type,reading\n\
             M9,S1,Temperature,60\n\
             M2,S2,Temperature,61\n\
             M9,S3,Pressure,100\n\
             M5,S4,Temperature,62\n",
        );

        let machines = load_readings(&path).unwrap();
        let order: Vec<&str> = machines.keys().map(String::as_str).collect();
        assert_eq!(order, vec!["M9", "M2", "M5"]);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_readings_duplicate_type_last_row_wins() {
        let path = temp_csv(
            "factory_monitor_test_dup.csv",
            "machine_id,sensor_id,sensor_type,reading\n\
             M1,S1,Temperature,60\n\
             M1,S2,Temperature,75\n",
        );

        let machines = load_readings(&path).unwrap();
        assert_eq!(machines["M1"].sensors().len(), 1);
        assert_eq!(machines["M1"].sensors()["Temperature"].reading(), 75.0);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_readings_ignores_extra_columns() {
        let path = temp_csv(
            "factory_monitor_test_extra.csv",
            "site,machine_id,sensor_id,sensor_type,reading\n\
             north,M1,S1,Temperature,60\n",
        );

        let machines = load_readings(&path).unwrap();
        assert_eq!(machines["M1"].sensors()["Temperature"].reading(), 60.0);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_readings_missing_column_fails() {
        let path = temp_csv(
            "factory_monitor_test_missing_col.csv",
            "machine_id,sensor_id,reading\n\
             M1,S1,60\n",
        );

        let err = load_readings(&path).unwrap_err();
        assert!(err.to_string().contains("sensor_type"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_readings_bad_reading_fails() {
        let path = temp_csv(
            "factory_monitor_test_bad_reading.csv",
            "machine_id,sensor_id,sensor_type,reading\n\
             M1,S1,Temperature,hot\n",
        );

        assert!(load_readings(&path).is_err());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_readings_empty_file_fails() {
        let path = temp_csv(
            "factory_monitor_test_empty.csv",
            "machine_id,sensor_id,sensor_type,reading\n",
        );

        let err = load_readings(&path).unwrap_err();
        assert!(err.to_string().contains("no sensor readings"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_readings_unreadable_file_fails() {
        let path = Path::new("/nonexistent/readings.csv");
        assert!(load_readings(path).is_err());
    }
}
