use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::conditions::HealthCondition;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Meal {
    pub id: Uuid,
    pub name: String,
    pub meal_type: String,
    pub diet_suitability: String,
    pub ingredients: String,
    pub instructions: String,
    pub total_cost: i32,
    pub calories: String,
    pub fat: String,
    pub protein: String,
    pub carbohydrates: String,
}

const MEAL_COLUMNS: &str = "m.id, m.name, m.meal_type, m.diet_suitability, m.ingredients, \
     m.instructions, m.total_cost, m.calories, m.fat, m.protein, m.carbohydrates";

impl Meal {
    /// Filtered listing. Every filter is optional; a NULL bind disables its
    /// predicate, so the WHERE clause is the AND of the active ones.
    pub async fn list_filtered(
        db: &PgPool,
        meal_type: Option<&str>,
        diet_suitability: Option<&str>,
        health_condition: Option<&str>,
        max_cost: Option<i64>,
    ) -> anyhow::Result<Vec<Meal>> {
        let rows = sqlx::query_as::<_, Meal>(&format!(
            r#"
            SELECT {MEAL_COLUMNS}
            FROM meals m
            WHERE ($1::text IS NULL OR m.meal_type = $1)
              AND ($2::text IS NULL OR m.diet_suitability = $2)
              AND ($3::text IS NULL OR EXISTS (
                    SELECT 1
                    FROM meal_health_conditions mhc
                    JOIN health_conditions hc ON hc.id = mhc.condition_id
                    WHERE mhc.meal_id = m.id AND hc.name = $3))
              AND ($4::bigint IS NULL OR m.total_cost <= $4)
            ORDER BY m.name
            "#
        ))
        .bind(meal_type)
        .bind(diet_suitability)
        .bind(health_condition)
        .bind(max_cost)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Meal>> {
        let meal = sqlx::query_as::<_, Meal>(&format!(
            "SELECT {MEAL_COLUMNS} FROM meals m WHERE m.id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(meal)
    }

    pub async fn conditions(db: &PgPool, meal_id: Uuid) -> anyhow::Result<Vec<HealthCondition>> {
        let rows = sqlx::query_as::<_, HealthCondition>(
            r#"
            SELECT hc.id, hc.name
            FROM meal_health_conditions mhc
            JOIN health_conditions hc ON hc.id = mhc.condition_id
            WHERE mhc.meal_id = $1
            ORDER BY hc.name
            "#,
        )
        .bind(meal_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }
}
