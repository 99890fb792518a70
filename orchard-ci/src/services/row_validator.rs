//! Row validation
//!
//! Pure, deterministic structural checks on one raw row. All checks run and
//! errors accumulate; an empty result means the row is acceptable. Nothing
//! here touches storage.

use crate::models::{CellValue, RawRow};
use once_cell::sync::Lazy;
use orchard_common::ColumnMap;
use regex::Regex;

// Accession: one or more alphanumerics, no punctuation or spaces
static ACCESSION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+$").unwrap());
// Province: two or more alphabetic characters
static PROVINCE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z]{2,}$").unwrap());
// Genus: capitalized initial, e.g. "Malus"
static GENUS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z][a-z]+$").unwrap());
// Species: all lowercase, e.g. "domestica"
static SPECIES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z]+$").unwrap());

/// Validate one raw row, returning human-readable error strings.
///
/// Blank cells count as absent: required-field checks fail on them, and
/// optional-field checks skip them.
pub fn validate_row(row: &RawRow, columns: &ColumnMap) -> Vec<String> {
    let mut errors = Vec::new();

    if row.text(&columns.cultivar_name).is_none() {
        errors.push(format!("Missing or invalid {}", columns.cultivar_name));
    }

    match row.text(&columns.accession) {
        Some(accession) if ACCESSION_RE.is_match(&accession) => {}
        _ => errors.push(format!("Missing or invalid {}", columns.accession)),
    }

    // Spreadsheet exports sometimes miscode free-text cells as numbers;
    // these fields must be string-typed when present.
    for label in [
        &columns.origin_country,
        &columns.origin_city,
        &columns.pedigree,
    ] {
        if let Some(CellValue::Number(_)) = row.get(label) {
            errors.push(format!("Invalid {}", label));
        }
    }

    if let Some(province) = row.text(&columns.origin_province) {
        if !PROVINCE_RE.is_match(&province) {
            errors.push(format!("Invalid {}", columns.origin_province));
        }
    }

    if let Some(genus) = row.text(&columns.genus) {
        if !GENUS_RE.is_match(&genus) {
            errors.push(format!("Invalid {}", columns.genus));
        }
    }

    if let Some(species) = row.text(&columns.species) {
        if !SPECIES_RE.is_match(&species) {
            errors.push(format!("Invalid {}", columns.species));
        }
    }

    errors
}
