use crate::choices::{is_diet, is_food_allergy};
use crate::profile::dto::ProfileForm;
use crate::validate::{FieldError, Rule};

pub const PROFILE_RULES: &[Rule<ProfileForm>] = &[
    name_present,
    age_positive,
    height_positive,
    weight_positive,
    diet_pref_choices,
    food_allergy_choice,
];

fn name_present(form: &ProfileForm) -> Option<FieldError> {
    if form.name.trim().is_empty() {
        Some(FieldError::new("name", "This field is required."))
    } else {
        None
    }
}

fn age_positive(form: &ProfileForm) -> Option<FieldError> {
    if form.age <= 0 {
        Some(FieldError::new("age", "Enter a positive number."))
    } else {
        None
    }
}

fn height_positive(form: &ProfileForm) -> Option<FieldError> {
    if form.height <= 0.0 {
        Some(FieldError::new("height", "Enter a positive number."))
    } else {
        None
    }
}

fn weight_positive(form: &ProfileForm) -> Option<FieldError> {
    if form.weight <= 0.0 {
        Some(FieldError::new("weight", "Enter a positive number."))
    } else {
        None
    }
}

fn diet_pref_choices(form: &ProfileForm) -> Option<FieldError> {
    let invalid = form.diet_pref.iter().find(|choice| !is_diet(choice.as_str()))?;
    Some(FieldError::new(
        "diet_pref",
        format!("Select a valid choice. {invalid} is not one of the available choices."),
    ))
}

fn food_allergy_choice(form: &ProfileForm) -> Option<FieldError> {
    match form.food_allergies.as_deref() {
        None | Some("") => None,
        Some(choice) if is_food_allergy(choice) => None,
        Some(choice) => Some(FieldError::new(
            "food_allergies",
            format!("Select a valid choice. {choice} is not one of the available choices."),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::run_rules;

    fn form() -> ProfileForm {
        ProfileForm {
            name: "Alice".into(),
            age: 30,
            height: 170.0,
            weight: 65.5,
            bio: None,
            profile_image: None,
            diet_pref: vec!["Vegan".into()],
            food_allergies: Some("gluten_intolerance".into()),
            health_conditions: vec![],
        }
    }

    #[test]
    fn valid_profile_passes() {
        assert!(run_rules(&form(), PROFILE_RULES).is_empty());
    }

    #[test]
    fn non_positive_numbers_are_rejected() {
        let mut bad = form();
        bad.age = 0;
        bad.height = -1.0;
        bad.weight = 0.0;
        let errors = run_rules(&bad, PROFILE_RULES);
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["age", "height", "weight"]);
    }

    #[test]
    fn unknown_diet_choice_is_rejected() {
        let mut bad = form();
        bad.diet_pref = vec!["Vegan".into(), "Carnivore".into()];
        let errors = run_rules(&bad, PROFILE_RULES);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "diet_pref");
        assert!(errors[0].message.contains("Carnivore"));
    }

    #[test]
    fn unknown_allergy_choice_is_rejected() {
        let mut bad = form();
        bad.food_allergies = Some("peanuts".into());
        let errors = run_rules(&bad, PROFILE_RULES);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "food_allergies");
    }

    #[test]
    fn empty_optional_fields_are_allowed() {
        let mut minimal = form();
        minimal.diet_pref = vec![];
        minimal.food_allergies = None;
        assert!(run_rules(&minimal, PROFILE_RULES).is_empty());
    }
}
