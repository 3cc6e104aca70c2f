use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::{
    auth::extractors::AuthUser,
    choices::{DIET_CHOICES, MEAL_TYPES},
    conditions::HealthCondition,
    error::ApiError,
    meals::{
        dto::{FilterEcho, MealDetails, MealListResponse},
        repo::Meal,
    },
    state::AppState,
};

use super::dto::MealFilter;

pub fn meal_routes() -> Router<AppState> {
    Router::new()
        .route("/meals", get(list_meals))
        .route("/meals/:id", get(get_meal))
}

/// Filtered catalog listing plus the condition reference list for the filter
/// controls. No pagination; the full filtered set is returned.
#[instrument(skip(state))]
pub async fn list_meals(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(filter): Query<MealFilter>,
) -> Result<Json<MealListResponse>, ApiError> {
    let meals = Meal::list_filtered(
        &state.db,
        filter.meal_type(),
        filter.diet_suitability(),
        filter.health_condition(),
        filter.max_cost(),
    )
    .await?;

    let health_conditions = HealthCondition::list_all(&state.db).await?;

    Ok(Json(MealListResponse {
        meals: meals.into_iter().map(Into::into).collect(),
        health_conditions,
        meal_type_choices: MEAL_TYPES.to_vec(),
        diet_choices: DIET_CHOICES.to_vec(),
        filter: FilterEcho {
            meal_type: filter.meal_type().map(str::to_string),
            diet_suitability: filter.diet_suitability().map(str::to_string),
            health_condition: filter.health_condition().map(str::to_string),
            total_cost: filter.max_cost(),
        },
    }))
}

#[instrument(skip(state))]
pub async fn get_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MealDetails>, ApiError> {
    let meal = Meal::find_by_id(&state.db, id).await?.ok_or_else(|| {
        warn!(%user_id, %id, "meal not found");
        ApiError::NotFound("Meal not found.".to_string())
    })?;

    let health_conditions = Meal::conditions(&state.db, meal.id).await?;

    Ok(Json(MealDetails {
        id: meal.id,
        name: meal.name,
        meal_type: meal.meal_type,
        diet_suitability: meal.diet_suitability,
        ingredients: meal.ingredients,
        instructions: meal.instructions,
        total_cost: meal.total_cost,
        calories: meal.calories,
        fat: meal.fat,
        protein: meal.protein,
        carbohydrates: meal.carbohydrates,
        health_conditions,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_echo_preserves_ui_state() {
        let echo = FilterEcho {
            meal_type: Some("Lunch".into()),
            diet_suitability: Some("Vegan".into()),
            health_condition: None,
            total_cost: Some(500),
        };
        let value = serde_json::to_value(&echo).unwrap();
        assert_eq!(value["meal_type"], "Lunch");
        assert_eq!(value["diet_suitability"], "Vegan");
        assert_eq!(value["health_condition"], serde_json::Value::Null);
        assert_eq!(value["total_cost"], 500);
    }
}
