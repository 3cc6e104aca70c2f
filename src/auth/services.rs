use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

use crate::auth::dto::{ResetPasswordRequest, SignupRequest};
use crate::validate::{is_valid_email, FieldError, Rule};

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

// Field rules, run in order; uniqueness checks live in the handler because
// they need the database.

pub const SIGNUP_RULES: &[Rule<SignupRequest>] = &[
    username_present,
    email_format,
    password_length,
    passwords_match,
];

pub const RESET_RULES: &[Rule<ResetPasswordRequest>] = &[reset_username_present, reset_passwords_match];

fn username_present(req: &SignupRequest) -> Option<FieldError> {
    if req.username.trim().is_empty() {
        Some(FieldError::new("username", "This field is required."))
    } else {
        None
    }
}

fn email_format(req: &SignupRequest) -> Option<FieldError> {
    if is_valid_email(req.email.trim()) {
        None
    } else {
        Some(FieldError::new("email", "Enter a valid email address."))
    }
}

fn password_length(req: &SignupRequest) -> Option<FieldError> {
    if req.password.len() < 8 {
        Some(FieldError::new(
            "password",
            "This password is too short. It must contain at least 8 characters.",
        ))
    } else {
        None
    }
}

fn passwords_match(req: &SignupRequest) -> Option<FieldError> {
    if req.password != req.confirm_password {
        Some(FieldError::new("confirm_password", "Passwords do not match."))
    } else {
        None
    }
}

fn reset_username_present(req: &ResetPasswordRequest) -> Option<FieldError> {
    if req.username.trim().is_empty() {
        Some(FieldError::new("username", "This field is required."))
    } else {
        None
    }
}

fn reset_passwords_match(req: &ResetPasswordRequest) -> Option<FieldError> {
    if req.new_password != req.confirm_password {
        Some(FieldError::new("confirm_password", "Passwords do not match."))
    } else {
        None
    }
}

#[cfg(test)]
mod password_tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let password = "Secur3P@ssw0rd!";
        let hash = hash_password(password).expect("hashing should succeed");
        assert!(verify_password(password, &hash).expect("verify should succeed"));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let password = "correct-horse-battery-staple";
        let hash = hash_password(password).expect("hashing should succeed");
        assert!(!verify_password("wrong-password", &hash).expect("verify should not error"));
    }

    #[test]
    fn verify_errors_on_malformed_hash() {
        let err = verify_password("anything", "not-a-valid-hash").unwrap_err();
        let msg = err.to_string();
        assert!(!msg.is_empty());
    }
}
