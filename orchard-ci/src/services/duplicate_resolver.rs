//! Duplicate detection for the import pipeline
//!
//! A candidate conflicts if its accession OR cultivar name matches an
//! existing record; either key alone is disqualifying. "Existing" covers
//! both the persisted catalog and rows already accepted earlier in the same
//! batch, so row N is checked against the outcomes of rows 1..N-1, not just
//! the pre-batch storage snapshot.

use crate::db::apples;
use orchard_common::Result;
use sqlx::SqlitePool;
use std::collections::HashSet;

/// Which natural key(s) collided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateKind {
    Accession,
    CultivarName,
    Both,
}

impl DuplicateKind {
    fn from_hits(accession: bool, cultivar_name: bool) -> Option<Self> {
        match (accession, cultivar_name) {
            (true, true) => Some(DuplicateKind::Both),
            (true, false) => Some(DuplicateKind::Accession),
            (false, true) => Some(DuplicateKind::CultivarName),
            (false, false) => None,
        }
    }

    /// Audit-log reason citing the colliding key(s)
    pub fn reason(&self) -> &'static str {
        match self {
            DuplicateKind::Accession => "Duplicate ACCESSION",
            DuplicateKind::CultivarName => "Duplicate CULTIVAR NAME",
            DuplicateKind::Both => "Duplicate ACCESSION and CULTIVAR NAME",
        }
    }
}

/// Natural-key check result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCheck {
    /// No conflict; continue processing
    Unique,
    /// Conflict with a persisted or already-accepted record
    Duplicate(DuplicateKind),
}

/// Tracks natural keys accepted so far in one batch and resolves candidates
/// against both the batch and the persisted catalog.
#[derive(Debug, Default)]
pub struct DuplicateResolver {
    batch_accessions: HashSet<String>,
    batch_cultivars: HashSet<String>,
}

impl DuplicateResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a candidate natural key.
    ///
    /// Batch-local keys are checked first (no storage round trip for
    /// intra-batch repeats), then the persisted catalog.
    pub async fn check(
        &self,
        pool: &SqlitePool,
        accession: &str,
        cultivar_name: &str,
    ) -> Result<KeyCheck> {
        let mut accession_hit = self.batch_accessions.contains(accession);
        let mut cultivar_hit = self.batch_cultivars.contains(cultivar_name);

        if !(accession_hit && cultivar_hit) {
            let stored = apples::find_natural_key_hits(pool, accession, cultivar_name).await?;
            accession_hit |= stored.accession;
            cultivar_hit |= stored.cultivar_name;
        }

        Ok(match DuplicateKind::from_hits(accession_hit, cultivar_hit) {
            Some(kind) => KeyCheck::Duplicate(kind),
            None => KeyCheck::Unique,
        })
    }

    /// Record a row accepted into this batch; later rows conflict with it
    pub fn record_accepted(&mut self, accession: &str, cultivar_name: &str) {
        self.batch_accessions.insert(accession.to_string());
        self.batch_cultivars.insert(cultivar_name.to_string());
    }
}
