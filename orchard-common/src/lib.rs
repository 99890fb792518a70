//! # Orchard Common Library
//!
//! Shared code for the orchard catalog tools including:
//! - Error types
//! - Configuration loading (TOML + column mapping)
//! - Database initialization and schema creation

pub mod config;
pub mod db;
pub mod error;

pub use config::{ColumnMap, TomlConfig};
pub use error::{Error, Result};
