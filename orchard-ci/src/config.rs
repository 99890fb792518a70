//! Importer configuration resolution
//!
//! Priority for each setting: command line (or its env fallback, handled by
//! clap) → TOML config file → compiled default.

use orchard_common::{ColumnMap, TomlConfig};
use std::path::PathBuf;

/// Compiled defaults used when neither CLI nor TOML supply a value
pub const DEFAULT_DATABASE_PATH: &str = "orchard.db";
pub const DEFAULT_AUDIT_DIR: &str = "logs";

/// Fully resolved importer configuration
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub database_path: PathBuf,
    pub audit_dir: PathBuf,
    pub columns: ColumnMap,
}

impl ResolvedConfig {
    /// Resolve settings from CLI arguments and a loaded TOML config
    pub fn resolve(
        cli_database: Option<PathBuf>,
        cli_audit_dir: Option<PathBuf>,
        toml: TomlConfig,
    ) -> Self {
        Self {
            database_path: cli_database
                .or(toml.database_path)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH)),
            audit_dir: cli_audit_dir
                .or(toml.audit_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_AUDIT_DIR)),
            columns: toml.columns.unwrap_or_default(),
        }
    }
}
