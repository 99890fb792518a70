//! orchard-ci library interface
//!
//! Cultivar Ingest: bulk reconciliation and import of apple cultivar
//! records from tabular inventory exports into the catalog database.
//!
//! Exposes public APIs for integration testing.

pub mod config;
pub mod db;
pub mod models;
pub mod services;
