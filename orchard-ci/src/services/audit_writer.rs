//! Audit log output
//!
//! After a run, each non-empty log is written twice: a full-fidelity JSON
//! dump (every entry with its original row and reason), and a flattened CSV
//! projection for spreadsheet viewing. Empty logs write nothing.

use crate::models::{AuditEntry, ImportOutcome};
use orchard_common::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Lead columns of the CSV projection, ahead of the source columns
const LEAD_FIELDS: &[&str] = &["accession", "cultivarName", "reason"];

/// Write audit logs for one import run, returning the paths written.
///
/// Validation failures go to `import-errors.{json,csv}`, duplicates to
/// `duplicate-entries.{json,csv}`.
pub fn write_audit_logs(dir: &Path, outcome: &ImportOutcome) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    written.extend(write_log(dir, "import-errors", &outcome.validation_failures)?);
    written.extend(write_log(dir, "duplicate-entries", &outcome.duplicates)?);
    Ok(written)
}

fn write_log(dir: &Path, stem: &str, entries: &[AuditEntry]) -> Result<Vec<PathBuf>> {
    if entries.is_empty() {
        return Ok(Vec::new());
    }
    fs::create_dir_all(dir)?;

    let json_path = dir.join(format!("{}.json", stem));
    let json = serde_json::to_string_pretty(entries)
        .map_err(|e| orchard_common::Error::Internal(format!("Serialize audit log: {}", e)))?;
    fs::write(&json_path, json)?;

    let csv_path = dir.join(format!("{}.csv", stem));
    write_csv(&csv_path, entries)?;

    info!(
        "Wrote {} audit entries to {} and {}",
        entries.len(),
        json_path.display(),
        csv_path.display()
    );
    Ok(vec![json_path, csv_path])
}

/// Flattened tabular projection: lead fields plus the union of columns
/// observed across entries, in first-seen order. Rows may be heterogeneous;
/// missing cells render empty.
fn write_csv(path: &Path, entries: &[AuditEntry]) -> Result<()> {
    let mut columns: Vec<String> = Vec::new();
    for entry in entries {
        for label in entry.row.labels() {
            if !columns.iter().any(|c| c == label) {
                columns.push(label.to_string());
            }
        }
    }

    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| orchard_common::Error::Internal(format!("Open audit CSV: {}", e)))?;

    let header: Vec<&str> = LEAD_FIELDS
        .iter()
        .copied()
        .chain(columns.iter().map(String::as_str))
        .collect();
    writer
        .write_record(&header)
        .map_err(|e| orchard_common::Error::Internal(format!("Write audit CSV: {}", e)))?;

    for entry in entries {
        let mut record: Vec<String> = vec![
            entry.accession.clone().unwrap_or_default(),
            entry.cultivar_name.clone().unwrap_or_default(),
            entry.reason.clone(),
        ];
        for column in &columns {
            record.push(
                entry
                    .row
                    .get(column)
                    .map(|v| v.to_display())
                    .unwrap_or_default(),
            );
        }
        writer
            .write_record(&record)
            .map_err(|e| orchard_common::Error::Internal(format!("Write audit CSV: {}", e)))?;
    }

    writer
        .flush()
        .map_err(|e| orchard_common::Error::Internal(format!("Flush audit CSV: {}", e)))?;
    Ok(())
}
