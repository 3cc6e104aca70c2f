use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// Reference data: health conditions a meal can be suitable for and a user
/// can report. Administrator-managed, no write handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct HealthCondition {
    pub id: Uuid,
    pub name: String,
}

impl HealthCondition {
    pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<HealthCondition>> {
        let rows = sqlx::query_as::<_, HealthCondition>(
            r#"
            SELECT id, name
            FROM health_conditions
            ORDER BY name
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn find_by_ids(db: &PgPool, ids: &[Uuid]) -> anyhow::Result<Vec<HealthCondition>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query_as::<_, HealthCondition>(
            r#"
            SELECT id, name
            FROM health_conditions
            WHERE id = ANY($1)
            ORDER BY name
            "#,
        )
        .bind(ids)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }
}
