use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::conditions::HealthCondition;

/// Profile form submission. Submitting replaces the whole profile; there is
/// no partial patch.
#[derive(Debug, Deserialize)]
pub struct ProfileForm {
    pub name: String,
    pub age: i32,
    pub height: f64,
    pub weight: f64,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub profile_image: Option<String>,
    /// Multi-select; stored comma-joined.
    #[serde(default)]
    pub diet_pref: Vec<String>,
    #[serde(default)]
    pub food_allergies: Option<String>,
    /// Ids of existing health conditions; replaces the stored set wholesale.
    #[serde(default)]
    pub health_conditions: Vec<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub name: String,
    pub age: i32,
    pub height: f64,
    pub weight: f64,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
    pub diet_pref: Vec<String>,
    pub food_allergies: Option<String>,
    pub health_conditions: Vec<HealthCondition>,
}

/// Everything the profile page needs: the stored profile (if any) plus the
/// reference lists that populate the form controls.
#[derive(Debug, Serialize)]
pub struct ProfileFormContext {
    pub profile: Option<ProfileResponse>,
    pub health_conditions: Vec<HealthCondition>,
    pub diet_choices: Vec<&'static str>,
    pub food_allergy_choices: Vec<&'static str>,
}
