//! Catalog database operations, one module per entity

pub mod apples;
pub mod attributes;
pub mod origins;
pub mod profiles;
