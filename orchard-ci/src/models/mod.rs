//! Data models for the cultivar ingest service

pub mod import_result;
pub mod raw_row;
pub mod records;

pub use import_result::{AuditEntry, ImportOutcome, ImportSummary};
pub use raw_row::{CellValue, RawRow};
pub use records::{
    AppleRecord, CandidateApple, CandidateRecord, NewApple, NewAttributes, NewOrigin, NewProfile,
};
