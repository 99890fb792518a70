//! Related-entity normalization
//!
//! Maps a raw row's loosely-labeled columns into apple-level fields plus the
//! three candidate sub-records. Everything here is best-effort coercion:
//! strings are trimmed, blanks become None, and unparseable weights or dates
//! collapse to None rather than erroring.

use crate::models::{
    CandidateApple, CandidateRecord, CellValue, NewAttributes, NewOrigin, NewProfile, RawRow,
};
use chrono::NaiveDate;
use orchard_common::ColumnMap;

/// Date formats seen in inventory exports, tried in order
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y"];

/// Normalize one raw row into a candidate record.
///
/// Assumes the row already passed validation; a missing accession or
/// cultivar name simply normalizes to an empty string.
pub fn normalize_row(row: &RawRow, columns: &ColumnMap) -> CandidateRecord {
    let apple = CandidateApple {
        acno: row.text(&columns.acno),
        accession: row.text(&columns.accession).unwrap_or_default(),
        cultivar_name: row.text(&columns.cultivar_name).unwrap_or_default(),
        harvest_date: row
            .text(&columns.harvest_date)
            .and_then(|raw| parse_harvest_date(&raw))
            .map(|date| date.format("%Y-%m-%d").to_string()),
        taste_notes: row.text(&columns.taste_notes),
        notes: row.text(&columns.notes),
        pedigree: row.text(&columns.pedigree),
    };

    let profile = NewProfile {
        genus: row.text(&columns.genus),
        species: row.text(&columns.species),
        pedigree: row.text(&columns.pedigree),
    };

    let attributes = NewAttributes {
        color: first_text(row, &columns.color),
        weight: row
            .get_first(&columns.weight)
            .and_then(parse_weight),
    };

    let origin = NewOrigin {
        country: row.text(&columns.origin_country),
        province: row.text(&columns.origin_province),
        city: row.text(&columns.origin_city),
    };

    CandidateRecord {
        apple,
        profile,
        attributes,
        origin,
    }
}

/// First present, non-blank cell among fallback labels, trimmed
fn first_text(row: &RawRow, labels: &[String]) -> Option<String> {
    row.get_first(labels).map(|v| v.to_display().trim().to_string())
}

/// Parse a weight cell to a number.
///
/// Text parses its leading numeric prefix ("150 g" → 150.0), matching how
/// the inventory's quantity column mixes units into the value. No numeric
/// prefix → None.
fn parse_weight(value: &CellValue) -> Option<f64> {
    match value {
        CellValue::Number(n) if n.is_finite() => Some(*n),
        CellValue::Number(_) => None,
        CellValue::Text(s) => {
            let s = s.trim();
            let mut end = 0;
            let bytes = s.as_bytes();
            if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
                end += 1;
            }
            let mut seen_dot = false;
            while end < bytes.len() {
                match bytes[end] {
                    b'0'..=b'9' => end += 1,
                    b'.' if !seen_dot => {
                        seen_dot = true;
                        end += 1;
                    }
                    _ => break,
                }
            }
            s[..end].parse::<f64>().ok()
        }
    }
}

/// Parse a date-like string against the known inventory formats
fn parse_harvest_date(raw: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw.trim(), fmt).ok())
}
