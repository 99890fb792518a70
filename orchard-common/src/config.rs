//! Configuration loading and column-map resolution
//!
//! The importer reads loosely-labeled spreadsheet exports; the mapping from
//! column label to record field is configuration, not code, so format drift
//! in the source inventory is handled by editing the TOML file.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Mapping from record field to the column label(s) that carry it.
///
/// Fields with multiple labels are tried in order; the first present,
/// non-blank cell wins. Defaults match the inventory spreadsheet the
/// catalog was originally loaded from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMap {
    pub accession: String,
    pub cultivar_name: String,
    pub acno: String,
    pub genus: String,
    pub species: String,
    pub pedigree: String,
    pub origin_country: String,
    pub origin_province: String,
    pub origin_city: String,
    pub color: Vec<String>,
    pub weight: Vec<String>,
    pub harvest_date: String,
    pub taste_notes: String,
    pub notes: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            accession: "ACCESSION".to_string(),
            cultivar_name: "CULTIVAR NAME".to_string(),
            acno: "ACNO".to_string(),
            genus: "E GENUS".to_string(),
            species: "E SPECIES".to_string(),
            pedigree: "E pedigree".to_string(),
            origin_country: "E Origin Country".to_string(),
            origin_province: "E Origin Province".to_string(),
            origin_city: "E Origin City".to_string(),
            color: vec!["Color".to_string(), "E color".to_string()],
            weight: vec!["Weight".to_string(), "E quant (Quantity)".to_string()],
            harvest_date: "E Date Collected".to_string(),
            taste_notes: "cmt (Inventory Comment)".to_string(),
            notes: "sitecmt (Site comment)".to_string(),
        }
    }
}

/// TOML configuration file schema
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    /// Path to the SQLite catalog database
    pub database_path: Option<PathBuf>,
    /// Directory where audit logs are written after an import run
    pub audit_dir: Option<PathBuf>,
    /// Column-label mapping overrides
    pub columns: Option<ColumnMap>,
}

/// Default configuration file path for the platform
/// (`~/.config/orchard/config.toml` on Linux)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("orchard").join("config.toml"))
}

/// Load TOML configuration with graceful degradation.
///
/// A missing file yields defaults with a warning; a present but unparseable
/// file is a configuration error (silently ignoring a typo'd config would
/// mask a wrong column map).
pub fn load_toml_config(path: Option<&Path>) -> Result<TomlConfig> {
    let resolved = match path {
        Some(p) => Some(p.to_path_buf()),
        None => default_config_path(),
    };

    let Some(config_path) = resolved else {
        warn!("Could not determine config directory; using compiled defaults");
        return Ok(TomlConfig::default());
    };

    if !config_path.exists() {
        warn!(
            "Config file not found: {}; using compiled defaults",
            config_path.display()
        );
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(&config_path)
        .map_err(|e| Error::Config(format!("Read config failed: {}", e)))?;
    let config: TomlConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse config failed: {}", e)))?;

    Ok(config)
}
