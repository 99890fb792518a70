//! Origin persistence

use crate::models::NewOrigin;
use orchard_common::Result;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Insert an origin sub-record, returning its id
pub async fn insert_origin(pool: &SqlitePool, origin: &NewOrigin) -> Result<Uuid> {
    let guid = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO origins (guid, country, province, city)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(guid.to_string())
    .bind(&origin.country)
    .bind(&origin.province)
    .bind(&origin.city)
    .execute(pool)
    .await?;

    Ok(guid)
}

/// Count origin sub-records (used by orphan checks in tests)
pub async fn count_origins(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM origins")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
