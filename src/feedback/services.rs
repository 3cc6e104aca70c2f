use crate::feedback::dto::FeedbackRequest;
use crate::validate::{is_valid_email, FieldError, Rule};

pub const FEEDBACK_RULES: &[Rule<FeedbackRequest>] =
    &[name_present, email_format, message_present, rating_range];

fn name_present(req: &FeedbackRequest) -> Option<FieldError> {
    if req.name.trim().is_empty() {
        Some(FieldError::new("name", "This field is required."))
    } else {
        None
    }
}

fn email_format(req: &FeedbackRequest) -> Option<FieldError> {
    if is_valid_email(req.email.trim()) {
        None
    } else {
        Some(FieldError::new("email", "Enter a valid email address."))
    }
}

fn message_present(req: &FeedbackRequest) -> Option<FieldError> {
    if req.message.trim().is_empty() {
        Some(FieldError::new("message", "This field is required."))
    } else {
        None
    }
}

fn rating_range(req: &FeedbackRequest) -> Option<FieldError> {
    if (1..=5).contains(&req.rating) {
        None
    } else {
        Some(FieldError::new(
            "rating",
            format!("Select a valid choice. {} is not one of the available choices.", req.rating),
        ))
    }
}

pub fn notification_subject(name: &str) -> String {
    format!("Contact Us Form Submission from {name}")
}

pub fn feedback_body(name: &str, email: &str, rating: i32, message: &str) -> String {
    format!("Name: {name}\nEmail: {email}\nRating: {rating}\n\nMessage:\n{message}")
}

pub fn contact_body(name: &str, email: &str, message: &str) -> String {
    format!("Name: {name}\nEmail: {email}\n\nMessage:\n{message}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::run_rules;

    fn request(rating: i32) -> FeedbackRequest {
        FeedbackRequest {
            name: "Alice".into(),
            email: "a@x.com".into(),
            message: "Great recipes".into(),
            rating,
        }
    }

    #[test]
    fn ratings_one_through_five_pass() {
        for rating in 1..=5 {
            assert!(run_rules(&request(rating), FEEDBACK_RULES).is_empty());
        }
    }

    #[test]
    fn rating_outside_bounds_fails_validation() {
        for rating in [0, 6, -1, 100] {
            let errors = run_rules(&request(rating), FEEDBACK_RULES);
            assert_eq!(errors.len(), 1, "rating {rating} should fail");
            assert_eq!(errors[0].field, "rating");
        }
    }

    #[test]
    fn blank_fields_and_bad_email_collect_together() {
        let req = FeedbackRequest {
            name: " ".into(),
            email: "nope".into(),
            message: "".into(),
            rating: 3,
        };
        let errors = run_rules(&req, FEEDBACK_RULES);
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["name", "email", "message"]);
    }

    #[test]
    fn notification_body_matches_the_email_format() {
        assert_eq!(
            notification_subject("Alice"),
            "Contact Us Form Submission from Alice"
        );
        assert_eq!(
            feedback_body("Alice", "a@x.com", 5, "Great"),
            "Name: Alice\nEmail: a@x.com\nRating: 5\n\nMessage:\nGreat"
        );
        assert_eq!(
            contact_body("Bob", "b@x.com", "Hi"),
            "Name: Bob\nEmail: b@x.com\n\nMessage:\nHi"
        );
    }
}
