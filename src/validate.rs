//! Form validation support.
//!
//! Each form declares an ordered list of rules; a rule is a pure function
//! from the input to an optional field error. All rules run and all failures
//! are collected, so a response carries every field error at once.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

pub type Rule<T> = fn(&T) -> Option<FieldError>;

pub fn run_rules<T>(input: &T, rules: &[Rule<T>]) -> Vec<FieldError> {
    rules.iter().filter_map(|rule| rule(input)).collect()
}

pub fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_regex_accepts_plain_addresses() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email("first.last@sub.example.org"));
    }

    #[test]
    fn email_regex_rejects_malformed_addresses() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@x.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn run_rules_collects_every_failure() {
        struct Input;
        fn fail_a(_: &Input) -> Option<FieldError> {
            Some(FieldError::new("a", "bad a"))
        }
        fn pass(_: &Input) -> Option<FieldError> {
            None
        }
        fn fail_b(_: &Input) -> Option<FieldError> {
            Some(FieldError::new("b", "bad b"))
        }

        let errors = run_rules(&Input, &[fail_a, pass, fail_b]);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "a");
        assert_eq!(errors[1].field, "b");
    }
}
