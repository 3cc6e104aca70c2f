use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::extractors::AuthUser,
    choices::{DIET_CHOICES, FOOD_ALLERGY_CHOICES},
    conditions::HealthCondition,
    error::ApiError,
    profile::{
        dto::{ProfileForm, ProfileFormContext, ProfileResponse},
        repo::UserProfile,
        services::PROFILE_RULES,
    },
    state::AppState,
    validate::{run_rules, FieldError},
};

pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/profile", get(get_profile).put(upsert_profile))
}

fn split_diet_pref(stored: Option<&str>) -> Vec<String> {
    stored
        .map(|joined| {
            joined
                .split(',')
                .filter(|part| !part.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn to_response(profile: UserProfile, conditions: Vec<HealthCondition>) -> ProfileResponse {
    ProfileResponse {
        name: profile.name,
        age: profile.age,
        height: profile.height,
        weight: profile.weight,
        bio: profile.bio,
        profile_image: profile.profile_image,
        diet_pref: split_diet_pref(profile.diet_pref.as_deref()),
        food_allergies: profile.food_allergies,
        health_conditions: conditions,
    }
}

/// Pre-fills the profile form: stored values when a profile exists, plus the
/// reference lists for the form controls.
#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ProfileFormContext>, ApiError> {
    let profile = match UserProfile::find_by_user(&state.db, user_id).await? {
        Some(profile) => {
            let conditions = UserProfile::conditions(&state.db, profile.id).await?;
            Some(to_response(profile, conditions))
        }
        None => None,
    };

    Ok(Json(ProfileFormContext {
        profile,
        health_conditions: HealthCondition::list_all(&state.db).await?,
        diet_choices: DIET_CHOICES.to_vec(),
        food_allergy_choices: FOOD_ALLERGY_CHOICES.to_vec(),
    }))
}

/// Full-replace upsert: creates the profile on first submission, overwrites
/// every field and the whole condition set after that.
#[instrument(skip(state, payload))]
pub async fn upsert_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<ProfileForm>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let mut errors = run_rules(&payload, PROFILE_RULES);

    let mut condition_ids: Vec<Uuid> = payload.health_conditions.clone();
    condition_ids.sort();
    condition_ids.dedup();

    let conditions = HealthCondition::find_by_ids(&state.db, &condition_ids).await?;
    if conditions.len() != condition_ids.len() {
        warn!(user_id = %user_id, "profile references unknown health conditions");
        errors.push(FieldError::new(
            "health_conditions",
            "Select a valid choice. One of the selected conditions does not exist.",
        ));
    }

    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let profile = UserProfile::upsert(&state.db, user_id, &payload, &condition_ids).await?;
    info!(user_id = %user_id, profile_id = %profile.id, "profile saved");

    Ok(Json(to_response(profile, conditions)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diet_pref_splits_the_comma_join() {
        assert_eq!(
            split_diet_pref(Some("Vegan,Vegetarian")),
            vec!["Vegan".to_string(), "Vegetarian".to_string()]
        );
        assert!(split_diet_pref(Some("")).is_empty());
        assert!(split_diet_pref(None).is_empty());
    }

    #[test]
    fn form_context_serializes_choice_lists() {
        let context = ProfileFormContext {
            profile: None,
            health_conditions: vec![],
            diet_choices: DIET_CHOICES.to_vec(),
            food_allergy_choices: FOOD_ALLERGY_CHOICES.to_vec(),
        };
        let value = serde_json::to_value(&context).unwrap();
        assert_eq!(value["profile"], serde_json::Value::Null);
        assert_eq!(value["diet_choices"][2], "Non-Vegetarian");
        assert_eq!(value["food_allergy_choices"][0], "lactose_intolerance");
    }
}
