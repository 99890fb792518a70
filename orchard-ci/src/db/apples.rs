//! Apple record persistence and natural-key lookups

use crate::models::{AppleRecord, NewApple};
use orchard_common::{Error, Result};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

/// Which side(s) of the natural key an existing record matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NaturalKeyHits {
    pub accession: bool,
    pub cultivar_name: bool,
}

impl NaturalKeyHits {
    pub fn any(&self) -> bool {
        self.accession || self.cultivar_name
    }
}

/// Check the persisted catalog for natural-key collisions.
///
/// A record conflicts if its accession OR cultivar name matches; either key
/// alone is enough to reject a candidate.
pub async fn find_natural_key_hits(
    pool: &SqlitePool,
    accession: &str,
    cultivar_name: &str,
) -> Result<NaturalKeyHits> {
    let row = sqlx::query(
        r#"
        SELECT
            EXISTS(SELECT 1 FROM apples WHERE accession = ?) AS accession_hit,
            EXISTS(SELECT 1 FROM apples WHERE cultivar_name = ?) AS cultivar_hit
        "#,
    )
    .bind(accession)
    .bind(cultivar_name)
    .fetch_one(pool)
    .await?;

    Ok(NaturalKeyHits {
        accession: row.get::<i64, _>("accession_hit") != 0,
        cultivar_name: row.get::<i64, _>("cultivar_hit") != 0,
    })
}

/// True if any persisted record shares either natural key
pub async fn exists_by_natural_key(
    pool: &SqlitePool,
    accession: &str,
    cultivar_name: &str,
) -> Result<bool> {
    Ok(find_natural_key_hits(pool, accession, cultivar_name)
        .await?
        .any())
}

/// Insert an apple record, returning its id.
///
/// The UNIQUE constraints on accession and cultivar_name still apply here;
/// a constraint violation surfaces as `Error::Database` for the caller to
/// handle (the bulk pipeline records it per-row rather than aborting).
pub async fn insert_apple(pool: &SqlitePool, apple: &NewApple) -> Result<Uuid> {
    let guid = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO apples (
            guid, acno, accession, cultivar_name, harvest_date,
            taste_notes, notes, pedigree, profile_id, attributes_id, origin_id
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(guid.to_string())
    .bind(&apple.acno)
    .bind(&apple.accession)
    .bind(&apple.cultivar_name)
    .bind(&apple.harvest_date)
    .bind(&apple.taste_notes)
    .bind(&apple.notes)
    .bind(&apple.pedigree)
    .bind(apple.profile_id.map(|id| id.to_string()))
    .bind(apple.attributes_id.map(|id| id.to_string()))
    .bind(apple.origin_id.to_string())
    .execute(pool)
    .await?;

    Ok(guid)
}

/// Create a single apple record interactively.
///
/// Unlike the bulk path, a duplicate natural key is surfaced synchronously
/// as a conflict and nothing is written.
pub async fn create_apple(pool: &SqlitePool, apple: &NewApple) -> Result<Uuid> {
    let accession = apple.accession.trim();
    let cultivar_name = apple.cultivar_name.trim();
    if accession.is_empty() || cultivar_name.is_empty() {
        return Err(Error::InvalidInput(
            "Missing required fields: accession, cultivarName, or originId".to_string(),
        ));
    }

    if exists_by_natural_key(pool, accession, cultivar_name).await? {
        return Err(Error::Conflict(
            "Duplicate accession or cultivarName".to_string(),
        ));
    }

    let trimmed = NewApple {
        accession: accession.to_string(),
        cultivar_name: cultivar_name.to_string(),
        harvest_date: apple.harvest_date.as_deref().map(|s| s.trim().to_string()),
        taste_notes: apple.taste_notes.as_deref().map(|s| s.trim().to_string()),
        notes: apple.notes.as_deref().map(|s| s.trim().to_string()),
        ..apple.clone()
    };
    insert_apple(pool, &trimmed).await
}

/// Load an apple record by accession
pub async fn load_apple_by_accession(
    pool: &SqlitePool,
    accession: &str,
) -> Result<Option<AppleRecord>> {
    let row = sqlx::query(
        r#"
        SELECT guid, acno, accession, cultivar_name, harvest_date,
               taste_notes, notes, pedigree, profile_id, attributes_id,
               origin_id, created_at
        FROM apples
        WHERE accession = ?
        "#,
    )
    .bind(accession)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => {
            let guid = parse_uuid(row.get("guid"))?;
            let profile_id = row
                .get::<Option<String>, _>("profile_id")
                .map(parse_uuid)
                .transpose()?;
            let attributes_id = row
                .get::<Option<String>, _>("attributes_id")
                .map(parse_uuid)
                .transpose()?;
            let origin_id = parse_uuid(row.get("origin_id"))?;
            // SQLite CURRENT_TIMESTAMP is naive UTC text
            let created_at = row.get::<chrono::NaiveDateTime, _>("created_at").and_utc();

            Ok(Some(AppleRecord {
                guid,
                acno: row.get("acno"),
                accession: row.get("accession"),
                cultivar_name: row.get("cultivar_name"),
                harvest_date: row.get("harvest_date"),
                taste_notes: row.get("taste_notes"),
                notes: row.get("notes"),
                pedigree: row.get("pedigree"),
                profile_id,
                attributes_id,
                origin_id,
                created_at,
            }))
        }
        None => Ok(None),
    }
}

/// Count apple records in the catalog
pub async fn count_apples(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM apples")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

fn parse_uuid(s: String) -> Result<Uuid> {
    Uuid::parse_str(&s).map_err(|e| Error::Internal(format!("Malformed guid in database: {}", e)))
}
