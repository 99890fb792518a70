//! orchard-ci - Cultivar Ingest
//!
//! Standalone bulk importer: reads a tabular inventory export (CSV),
//! reconciles each row against the catalog database, and writes audit logs
//! for rejected rows. Always completes with a summary unless the input file
//! itself cannot be read.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use orchard_ci::config::ResolvedConfig;
use orchard_ci::services::{read_rows, write_audit_logs, ImportPipeline};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for orchard-ci
#[derive(Parser, Debug)]
#[command(name = "orchard-ci")]
#[command(about = "Bulk importer for the orchard cultivar catalog")]
#[command(version)]
struct Args {
    /// Input CSV file (header row required)
    input: PathBuf,

    /// Path to the catalog database
    #[arg(long, env = "ORCHARD_DB")]
    db: Option<PathBuf>,

    /// Directory for audit logs
    #[arg(long, env = "ORCHARD_AUDIT_DIR")]
    audit_dir: Option<PathBuf>,

    /// TOML config file (default: ~/.config/orchard/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "orchard_ci=info,orchard_common=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let toml_config = orchard_common::config::load_toml_config(args.config.as_deref())
        .context("Failed to load configuration")?;
    let config = ResolvedConfig::resolve(args.db, args.audit_dir, toml_config);

    info!("Database: {}", config.database_path.display());
    info!("Audit logs: {}", config.audit_dir.display());

    let pool = orchard_common::db::init_database(&config.database_path)
        .await
        .context("Failed to open catalog database")?;

    // Whole-run input errors are fatal before any row is processed
    let rows = read_rows(&args.input).context("Failed to read input file")?;

    let pipeline = ImportPipeline::new(pool, config.columns);
    let outcome = pipeline.run(rows).await.context("Import run failed")?;

    let written = write_audit_logs(&config.audit_dir, &outcome)
        .context("Failed to write audit logs")?;
    for path in &written {
        info!("Audit log: {}", path.display());
    }

    let summary = &outcome.summary;
    println!(
        "Done. {} rows: {} inserted, {} validation failures, {} duplicates ({}s)",
        summary.total,
        summary.inserted,
        summary.validation_failed,
        summary.duplicates,
        summary.duration_seconds
    );

    Ok(())
}
