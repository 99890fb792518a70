//! Database initialization
//!
//! Opens (or creates) the SQLite catalog database and creates the schema
//! idempotently. All tables use `CREATE TABLE IF NOT EXISTS` so repeated
//! startup is safe.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    configure_and_create_schema(&pool).await?;

    Ok(pool)
}

/// Apply pragmas and create all catalog tables on an open pool.
///
/// Split out from [`init_database`] so tests can run against
/// `sqlite::memory:` pools.
pub async fn configure_and_create_schema(pool: &SqlitePool) -> Result<()> {
    // Enable foreign keys
    sqlx::query("PRAGMA foreign_keys = ON").execute(pool).await?;

    // WAL mode allows concurrent readers with one writer
    sqlx::query("PRAGMA journal_mode = WAL").execute(pool).await?;

    sqlx::query("PRAGMA busy_timeout = 5000").execute(pool).await?;

    // Sub-record tables first; apples references them
    create_apple_profiles_table(pool).await?;
    create_physical_attributes_table(pool).await?;
    create_origins_table(pool).await?;
    create_apples_table(pool).await?;

    Ok(())
}

/// Taxonomic profile sub-records (genus / species / pedigree)
pub async fn create_apple_profiles_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS apple_profiles (
            guid TEXT PRIMARY KEY,
            genus TEXT,
            species TEXT,
            pedigree TEXT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Physical attribute sub-records (color / weight)
pub async fn create_physical_attributes_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS physical_attributes (
            guid TEXT PRIMARY KEY,
            color TEXT,
            weight REAL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            CHECK (weight IS NULL OR weight >= 0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Origin sub-records (country / province / city)
pub async fn create_origins_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS origins (
            guid TEXT PRIMARY KEY,
            country TEXT,
            province TEXT,
            city TEXT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Apple cultivar records.
///
/// `accession` and `cultivar_name` carry UNIQUE constraints; the bulk import
/// path also checks them at the application layer per row so it can report
/// duplicates instead of erroring, but the constraints back the single-create
/// path and catch races in bulk.
pub async fn create_apples_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS apples (
            guid TEXT PRIMARY KEY,
            acno TEXT,
            accession TEXT NOT NULL UNIQUE,
            cultivar_name TEXT NOT NULL UNIQUE,
            harvest_date TEXT,
            taste_notes TEXT,
            notes TEXT,
            pedigree TEXT,
            profile_id TEXT REFERENCES apple_profiles(guid),
            attributes_id TEXT REFERENCES physical_attributes(guid),
            origin_id TEXT NOT NULL REFERENCES origins(guid),
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Natural-key lookups during duplicate detection
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_apples_accession ON apples(accession)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_apples_cultivar_name ON apples(cultivar_name)")
        .execute(pool)
        .await?;

    Ok(())
}
