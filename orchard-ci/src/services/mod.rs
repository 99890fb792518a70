//! Import pipeline services

pub mod audit_writer;
pub mod csv_source;
pub mod duplicate_resolver;
pub mod import_pipeline;
pub mod row_normalizer;
pub mod row_validator;

pub use audit_writer::write_audit_logs;
pub use csv_source::read_rows;
pub use duplicate_resolver::{DuplicateKind, DuplicateResolver, KeyCheck};
pub use import_pipeline::ImportPipeline;
pub use row_normalizer::normalize_row;
pub use row_validator::validate_row;
