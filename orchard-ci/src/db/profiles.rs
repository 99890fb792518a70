//! Taxonomic profile persistence

use crate::models::NewProfile;
use orchard_common::Result;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Insert a profile sub-record, returning its id
pub async fn insert_profile(pool: &SqlitePool, profile: &NewProfile) -> Result<Uuid> {
    let guid = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO apple_profiles (guid, genus, species, pedigree)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(guid.to_string())
    .bind(&profile.genus)
    .bind(&profile.species)
    .bind(&profile.pedigree)
    .execute(pool)
    .await?;

    Ok(guid)
}
