//! Bulk import pipeline
//!
//! Drives each raw row through validate → normalize → duplicate-check →
//! persist, accumulating accepted records and two audit logs (validation
//! failures and duplicates). Rows are processed strictly in input order
//! because duplicate detection for row N must see rows 1..N-1's outcomes.
//!
//! Per-row failures never abort the run: a row that fails validation, is a
//! duplicate, or hits a storage error is logged and the pipeline moves on.
//! The run only fails as a whole if the input could not be read at all,
//! which is the caller's concern before rows reach [`ImportPipeline::run`].

use crate::db::{apples, attributes, origins, profiles};
use crate::models::{AuditEntry, CandidateRecord, ImportOutcome, ImportSummary, NewApple, RawRow};
use crate::services::duplicate_resolver::{DuplicateResolver, KeyCheck};
use crate::services::{normalize_row, validate_row};
use orchard_common::{ColumnMap, Result};
use sqlx::SqlitePool;
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

/// Bulk import pipeline over one catalog database
pub struct ImportPipeline {
    db: SqlitePool,
    columns: ColumnMap,
}

impl ImportPipeline {
    pub fn new(db: SqlitePool, columns: ColumnMap) -> Self {
        Self { db, columns }
    }

    /// Run the pipeline over a fully materialized batch of rows.
    ///
    /// Duplicate checks run before any sub-record is written, so rejected
    /// rows leave no orphan sub-records. A storage race losing to a
    /// concurrent insert can still orphan the current row's sub-records;
    /// that per-row failure is logged and the run continues.
    pub async fn run(&self, rows: Vec<RawRow>) -> Result<ImportOutcome> {
        let started = Instant::now();
        let mut summary = ImportSummary::new();
        let mut validation_failures: Vec<AuditEntry> = Vec::new();
        let mut duplicates: Vec<AuditEntry> = Vec::new();
        let mut resolver = DuplicateResolver::new();

        summary.total = rows.len();
        info!("Starting import of {} rows", summary.total);

        for row in rows {
            let errors = validate_row(&row, &self.columns);
            if !errors.is_empty() {
                warn!(
                    accession = row.text(&self.columns.accession).as_deref().unwrap_or("N/A"),
                    "Skipping row: {}",
                    errors.join("; ")
                );
                validation_failures.push(AuditEntry::new(
                    row.text(&self.columns.accession),
                    row.text(&self.columns.cultivar_name),
                    errors.join("; "),
                    row,
                ));
                summary.validation_failed += 1;
                continue;
            }

            let candidate = normalize_row(&row, &self.columns);
            let accession = candidate.apple.accession.clone();
            let cultivar_name = candidate.apple.cultivar_name.clone();

            match resolver.check(&self.db, &accession, &cultivar_name).await? {
                KeyCheck::Duplicate(kind) => {
                    warn!(%accession, "Duplicate found, skipping: {}", kind.reason());
                    duplicates.push(AuditEntry::new(
                        Some(accession),
                        Some(cultivar_name),
                        kind.reason(),
                        row,
                    ));
                    summary.duplicates += 1;
                    continue;
                }
                KeyCheck::Unique => {}
            }

            match self.persist_candidate(candidate).await {
                Ok(_guid) => {
                    resolver.record_accepted(&accession, &cultivar_name);
                    summary.inserted += 1;
                }
                Err(e) => {
                    // Constraint race or other storage failure: log and move on
                    warn!(%accession, "Insert failed: {}", e);
                    duplicates.push(AuditEntry::new(
                        Some(accession),
                        Some(cultivar_name),
                        format!("Storage error: {}", e),
                        row,
                    ));
                    summary.duplicates += 1;
                }
            }
        }

        summary.duration_seconds = started.elapsed().as_secs();
        info!(
            "Import complete: {} inserted, {} validation failures, {} duplicates",
            summary.inserted, summary.validation_failed, summary.duplicates
        );

        Ok(ImportOutcome {
            summary,
            validation_failures,
            duplicates,
        })
    }

    /// Persist sub-records (profile, attributes, origin, in that order) and
    /// then the apple record referencing them.
    async fn persist_candidate(&self, candidate: CandidateRecord) -> Result<Uuid> {
        let profile_id = profiles::insert_profile(&self.db, &candidate.profile).await?;
        let attributes_id = attributes::insert_attributes(&self.db, &candidate.attributes).await?;
        let origin_id = origins::insert_origin(&self.db, &candidate.origin).await?;

        let apple = NewApple::from_candidate(
            candidate.apple,
            Some(profile_id),
            Some(attributes_id),
            origin_id,
        );
        apples::insert_apple(&self.db, &apple).await
    }
}
