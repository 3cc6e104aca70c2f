use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Append-only; rows are never mutated or deleted.
#[derive(Debug, Clone, FromRow)]
pub struct Feedback {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub message: String,
    pub rating: i32,
    pub created_at: OffsetDateTime,
}

impl Feedback {
    pub async fn create(
        db: &PgPool,
        name: &str,
        email: &str,
        message: &str,
        rating: i32,
    ) -> anyhow::Result<Feedback> {
        let feedback = sqlx::query_as::<_, Feedback>(
            r#"
            INSERT INTO feedback (name, email, message, rating)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, message, rating, created_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(message)
        .bind(rating)
        .fetch_one(db)
        .await?;
        Ok(feedback)
    }
}
