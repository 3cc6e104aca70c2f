use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::conditions::HealthCondition;
use crate::profile::dto::ProfileForm;

#[derive(Debug, Clone, FromRow)]
pub struct UserProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub age: i32,
    pub height: f64,
    pub weight: f64,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
    pub diet_pref: Option<String>,
    pub food_allergies: Option<String>,
    pub updated_at: OffsetDateTime,
}

const PROFILE_COLUMNS: &str =
    "id, user_id, name, age, height, weight, bio, profile_image, diet_pref, food_allergies, updated_at";

impl UserProfile {
    pub async fn find_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Option<UserProfile>> {
        let profile = sqlx::query_as::<_, UserProfile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM user_profiles WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(profile)
    }

    pub async fn conditions(db: &PgPool, profile_id: Uuid) -> anyhow::Result<Vec<HealthCondition>> {
        let rows = sqlx::query_as::<_, HealthCondition>(
            r#"
            SELECT hc.id, hc.name
            FROM profile_health_conditions phc
            JOIN health_conditions hc ON hc.id = phc.condition_id
            WHERE phc.profile_id = $1
            ORDER BY hc.name
            "#,
        )
        .bind(profile_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// Create-or-overwrite keyed by user, replacing the condition set
    /// wholesale. One transaction covers the scalar upsert and both
    /// association statements.
    pub async fn upsert(
        db: &PgPool,
        user_id: Uuid,
        form: &ProfileForm,
        condition_ids: &[Uuid],
    ) -> anyhow::Result<UserProfile> {
        let diet_pref = if form.diet_pref.is_empty() {
            None
        } else {
            Some(form.diet_pref.join(","))
        };

        let mut tx = db.begin().await?;

        let profile = sqlx::query_as::<_, UserProfile>(&format!(
            r#"
            INSERT INTO user_profiles
                (user_id, name, age, height, weight, bio, profile_image, diet_pref, food_allergies)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (user_id) DO UPDATE SET
                name = EXCLUDED.name,
                age = EXCLUDED.age,
                height = EXCLUDED.height,
                weight = EXCLUDED.weight,
                bio = EXCLUDED.bio,
                profile_image = EXCLUDED.profile_image,
                diet_pref = EXCLUDED.diet_pref,
                food_allergies = EXCLUDED.food_allergies,
                updated_at = now()
            RETURNING {PROFILE_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(form.name.trim())
        .bind(form.age)
        .bind(form.height)
        .bind(form.weight)
        .bind(form.bio.as_deref())
        .bind(form.profile_image.as_deref())
        .bind(diet_pref)
        .bind(form.food_allergies.as_deref())
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM profile_health_conditions WHERE profile_id = $1")
            .bind(profile.id)
            .execute(&mut *tx)
            .await?;

        if !condition_ids.is_empty() {
            sqlx::query(
                r#"
                INSERT INTO profile_health_conditions (profile_id, condition_id)
                SELECT $1, unnest($2::uuid[])
                "#,
            )
            .bind(profile.id)
            .bind(condition_ids)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(profile)
    }
}
