//! Physical attribute persistence

use crate::models::NewAttributes;
use orchard_common::Result;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Insert a physical-attributes sub-record, returning its id
pub async fn insert_attributes(pool: &SqlitePool, attributes: &NewAttributes) -> Result<Uuid> {
    let guid = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO physical_attributes (guid, color, weight)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(guid.to_string())
    .bind(&attributes.color)
    .bind(attributes.weight)
    .execute(pool)
    .await?;

    Ok(guid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::Row;

    #[tokio::test]
    async fn insert_attributes_allows_absent_weight() {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        orchard_common::db::configure_and_create_schema(&pool)
            .await
            .unwrap();

        let guid = insert_attributes(
            &pool,
            &NewAttributes {
                color: Some("Red".into()),
                weight: None,
            },
        )
        .await
        .unwrap();

        let row = sqlx::query("SELECT color, weight FROM physical_attributes WHERE guid = ?")
            .bind(guid.to_string())
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(row.get::<String, _>("color"), "Red");
        assert_eq!(row.get::<Option<f64>, _>("weight"), None);
    }
}
