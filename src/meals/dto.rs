use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::conditions::HealthCondition;
use crate::meals::repo::Meal;

/// Query-string filters. All optional, combined with AND. Values arrive as
/// raw strings; empty strings count as absent, mirroring unfilled form
/// controls.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MealFilter {
    pub meal_type: Option<String>,
    pub diet_suitability: Option<String>,
    pub health_condition: Option<String>,
    pub total_cost: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl MealFilter {
    pub fn meal_type(&self) -> Option<&str> {
        non_empty(&self.meal_type)
    }

    pub fn diet_suitability(&self) -> Option<&str> {
        non_empty(&self.diet_suitability)
    }

    pub fn health_condition(&self) -> Option<&str> {
        non_empty(&self.health_condition)
    }

    /// Inclusive cost ceiling. Malformed or absent input disables the filter
    /// instead of failing the request.
    pub fn max_cost(&self) -> Option<i64> {
        non_empty(&self.total_cost).and_then(|raw| raw.parse::<i64>().ok())
    }
}

#[derive(Debug, Serialize)]
pub struct MealListItem {
    pub id: Uuid,
    pub name: String,
    pub meal_type: String,
    pub diet_suitability: String,
    pub total_cost: i32,
}

impl From<Meal> for MealListItem {
    fn from(meal: Meal) -> Self {
        Self {
            id: meal.id,
            name: meal.name,
            meal_type: meal.meal_type,
            diet_suitability: meal.diet_suitability,
            total_cost: meal.total_cost,
        }
    }
}

/// Echo of the applied filter values, for preserving UI state.
#[derive(Debug, Serialize)]
pub struct FilterEcho {
    pub meal_type: Option<String>,
    pub diet_suitability: Option<String>,
    pub health_condition: Option<String>,
    pub total_cost: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct MealListResponse {
    pub meals: Vec<MealListItem>,
    /// Reference lists for the filter controls.
    pub health_conditions: Vec<HealthCondition>,
    pub meal_type_choices: Vec<&'static str>,
    pub diet_choices: Vec<&'static str>,
    pub filter: FilterEcho,
}

#[derive(Debug, Serialize)]
pub struct MealDetails {
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
    pub health_conditions: Vec<HealthCondition>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(total_cost: Option<&str>) -> MealFilter {
        MealFilter {
            total_cost: total_cost.map(str::to_string),
            ..MealFilter::default()
        }
    }

    #[test]
    fn max_cost_parses_plain_integers() {
        assert_eq!(filter(Some("500")).max_cost(), Some(500));
        assert_eq!(filter(Some(" 42 ")).max_cost(), Some(42));
    }

    #[test]
    fn malformed_max_cost_disables_the_filter() {
        assert_eq!(filter(Some("cheap")).max_cost(), None);
        assert_eq!(filter(Some("12.5.3")).max_cost(), None);
        assert_eq!(filter(Some("")).max_cost(), None);
        assert_eq!(filter(None).max_cost(), None);
    }

    #[test]
    fn empty_strings_count_as_absent_filters() {
        let f = MealFilter {
            meal_type: Some("".into()),
            diet_suitability: Some("  ".into()),
            health_condition: None,
            total_cost: None,
        };
        assert_eq!(f.meal_type(), None);
        assert_eq!(f.diet_suitability(), None);
        assert_eq!(f.health_condition(), None);
    }

    #[test]
    fn present_filters_pass_through_trimmed() {
        let f = MealFilter {
            meal_type: Some("Lunch".into()),
            diet_suitability: Some("Vegan".into()),
            health_condition: Some("Diabetes".into()),
            total_cost: Some("500".into()),
        };
        assert_eq!(f.meal_type(), Some("Lunch"));
        assert_eq!(f.diet_suitability(), Some("Vegan"));
        assert_eq!(f.health_condition(), Some("Diabetes"));
    }
}
