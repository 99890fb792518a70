//! Import run results and audit entries

use crate::models::RawRow;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// One rejected row: natural-key fields and the reason(s), plus the full
/// original row for audit fidelity.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditEntry {
    pub accession: Option<String>,
    pub cultivar_name: Option<String>,
    /// Validation errors joined with "; ", or a duplicate/storage reason
    pub reason: String,
    pub row: RawRow,
}

impl AuditEntry {
    pub fn new(
        accession: Option<String>,
        cultivar_name: Option<String>,
        reason: impl Into<String>,
        row: RawRow,
    ) -> Self {
        Self {
            accession,
            cultivar_name,
            reason: reason.into(),
            row,
        }
    }
}

// Flattened serialization: lead fields first, then the original row's cells,
// so the JSON dump reads like the source spreadsheet with a reason attached.
impl Serialize for AuditEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3 + self.row.len()))?;
        map.serialize_entry("accession", &self.accession)?;
        map.serialize_entry("cultivarName", &self.cultivar_name)?;
        map.serialize_entry("reason", &self.reason)?;
        for (label, value) in self.row.iter() {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

/// Import completion summary
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportSummary {
    /// Total rows consumed
    pub total: usize,
    /// Rows persisted
    pub inserted: usize,
    /// Rows rejected by validation
    pub validation_failed: usize,
    /// Rows rejected as duplicates (including per-row storage failures)
    pub duplicates: usize,
    /// Wall-clock duration of the run in seconds
    pub duration_seconds: u64,
}

impl ImportSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every consumed row is accounted for exactly once
    pub fn is_balanced(&self) -> bool {
        self.inserted + self.validation_failed + self.duplicates == self.total
    }
}

/// Full outcome of one import run: counts plus both audit logs
#[derive(Debug, Clone, Default)]
pub struct ImportOutcome {
    pub summary: ImportSummary,
    pub validation_failures: Vec<AuditEntry>,
    pub duplicates: Vec<AuditEntry>,
}
