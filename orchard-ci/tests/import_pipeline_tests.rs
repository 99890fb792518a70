//! Integration tests for the bulk import pipeline
//!
//! Each test runs against a fresh in-memory SQLite database with the full
//! catalog schema, driving the pipeline the same way the CLI does.

use orchard_ci::db::{apples, origins};
use orchard_ci::models::{CellValue, RawRow};
use orchard_ci::services::{read_rows, write_audit_logs, ImportPipeline};
use orchard_common::ColumnMap;
use sqlx::SqlitePool;

async fn test_pool() -> SqlitePool {
    let pool = SqlitePool::connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");
    orchard_common::db::configure_and_create_schema(&pool)
        .await
        .expect("Failed to create schema");
    pool
}

fn row(cells: &[(&str, &str)]) -> RawRow {
    cells
        .iter()
        .map(|(label, value)| (label.to_string(), CellValue::Text(value.to_string())))
        .collect()
}

fn pipeline(pool: &SqlitePool) -> ImportPipeline {
    ImportPipeline::new(pool.clone(), ColumnMap::default())
}

#[tokio::test]
async fn clean_row_is_inserted() {
    // Scenario: one well-formed row with no conflicts
    let pool = test_pool().await;
    let rows = vec![row(&[
        ("ACCESSION", "TD001"),
        ("CULTIVAR NAME", "Honeycrisp"),
        ("E GENUS", "Malus"),
        ("E SPECIES", "domestica"),
        ("E Origin Country", "Canada"),
    ])];

    let outcome = pipeline(&pool).run(rows).await.unwrap();

    assert_eq!(outcome.summary.inserted, 1);
    assert_eq!(outcome.summary.validation_failed, 0);
    assert_eq!(outcome.summary.duplicates, 0);

    let record = apples::load_apple_by_accession(&pool, "TD001")
        .await
        .unwrap()
        .expect("record not persisted");
    assert_eq!(record.cultivar_name, "Honeycrisp");
    // Sub-records were created and referenced
    assert!(record.profile_id.is_some());
    assert!(record.attributes_id.is_some());
}

#[tokio::test]
async fn missing_accession_goes_to_validation_log() {
    let pool = test_pool().await;
    let rows = vec![row(&[("ACCESSION", ""), ("CULTIVAR NAME", "Gala")])];

    let outcome = pipeline(&pool).run(rows).await.unwrap();

    assert_eq!(outcome.summary.inserted, 0);
    assert_eq!(outcome.summary.validation_failed, 1);
    assert_eq!(outcome.validation_failures.len(), 1);
    assert!(outcome.validation_failures[0]
        .reason
        .contains("Missing or invalid ACCESSION"));
    assert_eq!(apples::count_apples(&pool).await.unwrap(), 0);
}

#[tokio::test]
async fn intra_batch_duplicate_is_first_wins() {
    // Two rows share an accession; no pre-existing records
    let pool = test_pool().await;
    let rows = vec![
        row(&[("ACCESSION", "TD002"), ("CULTIVAR NAME", "Gala")]),
        row(&[("ACCESSION", "TD002"), ("CULTIVAR NAME", "Fuji")]),
    ];

    let outcome = pipeline(&pool).run(rows).await.unwrap();

    assert_eq!(outcome.summary.inserted, 1);
    assert_eq!(outcome.summary.duplicates, 1);
    assert_eq!(outcome.duplicates[0].reason, "Duplicate ACCESSION");

    // First row won
    let record = apples::load_apple_by_accession(&pool, "TD002")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.cultivar_name, "Gala");
}

#[tokio::test]
async fn duplicate_against_persisted_record_cites_cultivar() {
    let pool = test_pool().await;

    // Seed the catalog through a first run
    let outcome = pipeline(&pool)
        .run(vec![row(&[
            ("ACCESSION", "TD003"),
            ("CULTIVAR NAME", "Ambrosia"),
        ])])
        .await
        .unwrap();
    assert_eq!(outcome.summary.inserted, 1);

    // Second run shares only the cultivar name
    let outcome = pipeline(&pool)
        .run(vec![row(&[
            ("ACCESSION", "TD900"),
            ("CULTIVAR NAME", "Ambrosia"),
        ])])
        .await
        .unwrap();

    assert_eq!(outcome.summary.duplicates, 1);
    assert_eq!(outcome.duplicates[0].reason, "Duplicate CULTIVAR NAME");
}

#[tokio::test]
async fn unparseable_weight_persists_with_weight_absent() {
    let pool = test_pool().await;
    let rows = vec![row(&[
        ("ACCESSION", "TD004"),
        ("CULTIVAR NAME", "Empire"),
        ("Weight", "not a number"),
    ])];

    let outcome = pipeline(&pool).run(rows).await.unwrap();
    assert_eq!(outcome.summary.inserted, 1);

    let record = apples::load_apple_by_accession(&pool, "TD004")
        .await
        .unwrap()
        .unwrap();
    let weight: Option<f64> =
        sqlx::query_scalar("SELECT weight FROM physical_attributes WHERE guid = ?")
            .bind(record.attributes_id.unwrap().to_string())
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(weight, None);
}

#[tokio::test]
async fn empty_input_completes_with_zero_counts() {
    let pool = test_pool().await;
    let outcome = pipeline(&pool).run(Vec::new()).await.unwrap();

    assert_eq!(outcome.summary.total, 0);
    assert_eq!(outcome.summary.inserted, 0);
    assert_eq!(outcome.summary.validation_failed, 0);
    assert_eq!(outcome.summary.duplicates, 0);

    // And the audit writer writes nothing for an empty run
    let dir = tempfile::tempdir().unwrap();
    let written = write_audit_logs(dir.path(), &outcome).unwrap();
    assert!(written.is_empty());
}

#[tokio::test]
async fn every_row_is_accounted_for() {
    // Mixed batch: accepted, validation failure, intra-batch duplicate
    let pool = test_pool().await;
    let rows = vec![
        row(&[("ACCESSION", "TD010"), ("CULTIVAR NAME", "Spartan")]),
        row(&[("ACCESSION", "bad key"), ("CULTIVAR NAME", "Liberty")]),
        row(&[("ACCESSION", "TD010"), ("CULTIVAR NAME", "Cortland")]),
        row(&[("ACCESSION", "TD011"), ("CULTIVAR NAME", "Jonagold")]),
        row(&[("CULTIVAR NAME", "Braeburn")]),
    ];

    let outcome = pipeline(&pool).run(rows).await.unwrap();

    assert_eq!(outcome.summary.total, 5);
    assert!(outcome.summary.is_balanced());
    assert_eq!(outcome.summary.inserted, 2);
    assert_eq!(outcome.summary.validation_failed, 2);
    assert_eq!(outcome.summary.duplicates, 1);
}

#[tokio::test]
async fn duplicate_rows_create_no_orphan_sub_records() {
    // Duplicate check runs before any sub-record insert, so a rejected row
    // leaves nothing behind
    let pool = test_pool().await;
    let rows = vec![
        row(&[("ACCESSION", "TD020"), ("CULTIVAR NAME", "Mutsu")]),
        row(&[("ACCESSION", "TD020"), ("CULTIVAR NAME", "Idared")]),
    ];

    let outcome = pipeline(&pool).run(rows).await.unwrap();
    assert_eq!(outcome.summary.inserted, 1);
    assert_eq!(outcome.summary.duplicates, 1);
    assert_eq!(origins::count_origins(&pool).await.unwrap(), 1);
}

#[tokio::test]
async fn storage_failure_is_logged_per_row_and_run_continues() {
    let pool = test_pool().await;

    // Sabotage apple persistence only; the duplicate check and sub-record
    // inserts still work, so the failure surfaces at the apple insert
    sqlx::query("DROP TABLE apples").execute(&pool).await.unwrap();
    sqlx::query(
        "CREATE TABLE apples (
            guid TEXT PRIMARY KEY,
            accession TEXT NOT NULL CHECK (accession <> 'TD030'),
            cultivar_name TEXT NOT NULL UNIQUE,
            acno TEXT, harvest_date TEXT, taste_notes TEXT, notes TEXT,
            pedigree TEXT, profile_id TEXT, attributes_id TEXT,
            origin_id TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
    )
    .execute(&pool)
    .await
    .unwrap();

    let rows = vec![
        row(&[("ACCESSION", "TD030"), ("CULTIVAR NAME", "Winesap")]),
        row(&[("ACCESSION", "TD031"), ("CULTIVAR NAME", "Baldwin")]),
    ];

    let outcome = pipeline(&pool).run(rows).await.unwrap();

    // First row failed at the storage layer, second still inserted
    assert_eq!(outcome.summary.inserted, 1);
    assert_eq!(outcome.summary.duplicates, 1);
    assert!(outcome.duplicates[0].reason.starts_with("Storage error"));
    assert!(outcome.summary.is_balanced());
}

#[tokio::test]
async fn leading_zero_accession_survives_csv_ingest() {
    // Digit-only accessions with leading zeros are natural keys, not
    // numbers; they must persist and duplicate-check byte-for-byte
    let pool = test_pool().await;
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("inventory.csv");
    std::fs::write(
        &input,
        "ACCESSION,CULTIVAR NAME\n0012,Honeycrisp\n0012,Gala\n",
    )
    .unwrap();

    let rows = read_rows(&input).unwrap();
    let outcome = pipeline(&pool).run(rows).await.unwrap();

    assert_eq!(outcome.summary.inserted, 1);
    assert_eq!(outcome.summary.duplicates, 1);

    let record = apples::load_apple_by_accession(&pool, "0012")
        .await
        .unwrap()
        .expect("record persisted under its original key");
    assert_eq!(record.accession, "0012");
    assert!(apples::load_apple_by_accession(&pool, "12")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn csv_file_end_to_end() {
    let pool = test_pool().await;
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("inventory.csv");
    std::fs::write(
        &input,
        "ACCESSION,CULTIVAR NAME,E GENUS,Weight\n\
         TD040,Honeycrisp,Malus,150\n\
         TD040,Gala,Malus,130\n\
         ,Missing Accession,Malus,\n",
    )
    .unwrap();

    let rows = read_rows(&input).unwrap();
    let outcome = pipeline(&pool).run(rows).await.unwrap();

    assert_eq!(outcome.summary.total, 3);
    assert_eq!(outcome.summary.inserted, 1);
    assert_eq!(outcome.summary.duplicates, 1);
    assert_eq!(outcome.summary.validation_failed, 1);

    let audit_dir = dir.path().join("logs");
    let written = write_audit_logs(&audit_dir, &outcome).unwrap();
    assert_eq!(written.len(), 4); // both logs, JSON + CSV each

    let errors_json: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(audit_dir.join("import-errors.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(errors_json.as_array().unwrap().len(), 1);
    let duplicates_json: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(audit_dir.join("duplicate-entries.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(duplicates_json[0]["reason"], "Duplicate ACCESSION");
}
