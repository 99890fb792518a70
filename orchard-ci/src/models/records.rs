//! Catalog record types
//!
//! `New*` types are candidate records before insertion; `AppleRecord` is the
//! persisted shape. Sub-records (profile, attributes, origin) are created
//! fresh for every accepted apple row and never deduplicated across rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Taxonomic profile sub-record (e.g. genus "Malus", species "domestica")
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewProfile {
    pub genus: Option<String>,
    pub species: Option<String>,
    pub pedigree: Option<String>,
}

/// Physical attributes sub-record.
/// `weight` is parsed from free text; unparseable values collapse to None.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewAttributes {
    pub color: Option<String>,
    pub weight: Option<f64>,
}

/// Origin sub-record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewOrigin {
    pub country: Option<String>,
    pub province: Option<String>,
    pub city: Option<String>,
}

/// Apple-level fields of a normalized row, before sub-record ids exist
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateApple {
    pub acno: Option<String>,
    pub accession: String,
    pub cultivar_name: String,
    /// ISO date string when the source value parsed, None otherwise
    pub harvest_date: Option<String>,
    pub taste_notes: Option<String>,
    pub notes: Option<String>,
    pub pedigree: Option<String>,
}

/// Fully normalized row: apple fields plus the three candidate sub-records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateRecord {
    pub apple: CandidateApple,
    pub profile: NewProfile,
    pub attributes: NewAttributes,
    pub origin: NewOrigin,
}

/// A new apple record ready for insertion, referencing persisted sub-records
#[derive(Debug, Clone, PartialEq)]
pub struct NewApple {
    pub acno: Option<String>,
    pub accession: String,
    pub cultivar_name: String,
    pub harvest_date: Option<String>,
    pub taste_notes: Option<String>,
    pub notes: Option<String>,
    pub pedigree: Option<String>,
    pub profile_id: Option<Uuid>,
    pub attributes_id: Option<Uuid>,
    pub origin_id: Uuid,
}

impl NewApple {
    /// Build from a candidate plus the ids of its persisted sub-records
    pub fn from_candidate(
        candidate: CandidateApple,
        profile_id: Option<Uuid>,
        attributes_id: Option<Uuid>,
        origin_id: Uuid,
    ) -> Self {
        Self {
            acno: candidate.acno,
            accession: candidate.accession,
            cultivar_name: candidate.cultivar_name,
            harvest_date: candidate.harvest_date,
            taste_notes: candidate.taste_notes,
            notes: candidate.notes,
            pedigree: candidate.pedigree,
            profile_id,
            attributes_id,
            origin_id,
        }
    }
}

/// Persisted apple record
#[derive(Debug, Clone, Serialize)]
pub struct AppleRecord {
    pub guid: Uuid,
    pub acno: Option<String>,
    pub accession: String,
    pub cultivar_name: String,
    pub harvest_date: Option<String>,
    pub taste_notes: Option<String>,
    pub notes: Option<String>,
    pub pedigree: Option<String>,
    pub profile_id: Option<Uuid>,
    pub attributes_id: Option<Uuid>,
    pub origin_id: Uuid,
    pub created_at: DateTime<Utc>,
}
