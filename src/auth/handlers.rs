use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{debug, info, instrument, warn};

use crate::{
    auth::{
        dto::{
            AuthResponse, LoginRequest, LogoutResponse, MessageResponse, PublicUser,
            ResetPasswordRequest, SignupRequest,
        },
        extractors::{AuthUser, SessionToken},
        repo::{Session, User},
        services::{hash_password, verify_password, RESET_RULES, SIGNUP_RULES},
    },
    error::ApiError,
    state::AppState,
    validate::{is_valid_email, run_rules, FieldError},
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/password-reset", post(reset_password))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let mut errors = run_rules(&payload, SIGNUP_RULES);

    let username = payload.username.trim();
    let email = payload.email.trim().to_lowercase();

    // Uniqueness checks join the field errors so everything surfaces at once.
    if !username.is_empty() && User::find_by_username(&state.db, username).await?.is_some() {
        warn!(%username, "signup duplicate username");
        errors.push(FieldError::new(
            "username",
            "A user with that username already exists.",
        ));
    }
    if is_valid_email(&email) && User::find_by_email(&state.db, &email).await?.is_some() {
        warn!(%email, "signup duplicate email");
        errors.push(FieldError::new(
            "email",
            "This email is already in use. Please use a different email address.",
        ));
    }

    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let hash = hash_password(&payload.password)?;
    let user = User::create(&state.db, username, &email, &hash).await?;

    // Signup logs the user in immediately, no confirmation step.
    let session = Session::open(&state.db, user.id, state.config.session.ttl_minutes).await?;

    info!(user_id = %user.id, username = %user.username, "user signed up");
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token: session.token,
            redirect_to: "/".to_string(),
            user: user.into(),
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    // Generic message for both factors, never reveal which one failed.
    let invalid = || ApiError::Unauthorized("Invalid username or password.".to_string());

    let user = match User::find_by_username(&state.db, payload.username.trim()).await? {
        Some(user) => user,
        None => {
            warn!(username = %payload.username, "login unknown username");
            return Err(invalid());
        }
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = %user.id, "login invalid password");
        return Err(invalid());
    }

    let pruned = Session::prune_expired(&state.db, user.id).await?;
    if pruned > 0 {
        debug!(user_id = %user.id, pruned, "expired sessions pruned");
    }

    let session = Session::open(&state.db, user.id, state.config.session.ttl_minutes).await?;

    let redirect_to = payload
        .next
        .filter(|next| !next.is_empty())
        .unwrap_or_else(|| "/".to_string());

    info!(user_id = %user.id, "user logged in");
    Ok(Json(AuthResponse {
        token: session.token,
        redirect_to,
        user: user.into(),
    }))
}

#[instrument(skip(state))]
pub async fn logout(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    SessionToken(token): SessionToken,
) -> Result<Json<LogoutResponse>, ApiError> {
    Session::close(&state.db, token).await?;
    info!(user_id = %user_id, "user logged out");
    Ok(Json(LogoutResponse {
        redirect_to: "/".to_string(),
    }))
}

/// Simplified reset: overwrites the hash for a bare username match, then
/// invalidates every open session for that user.
#[instrument(skip(state, payload))]
pub async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let errors = run_rules(&payload, RESET_RULES);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let user = User::find_by_username(&state.db, payload.username.trim())
        .await?
        .ok_or_else(|| {
            warn!(username = %payload.username, "password reset unknown username");
            ApiError::NotFound("User with this username does not exist.".to_string())
        })?;

    let hash = hash_password(&payload.new_password)?;
    User::update_password(&state.db, user.id, &hash).await?;
    let closed = Session::close_all_for_user(&state.db, user.id).await?;

    info!(user_id = %user.id, closed_sessions = closed, "password reset");
    Ok(Json(MessageResponse {
        message: "Your password has been reset successfully. You can now log in with your new password."
            .to_string(),
    }))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<PublicUser>, ApiError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("User not found".to_string()))?;
    Ok(Json(user.into()))
}

#[cfg(test)]
mod me_tests {
    use super::*;

    #[test]
    fn public_user_serializes_without_password_hash() {
        let response = PublicUser {
            id: uuid::Uuid::new_v4(),
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("alice"));
        assert!(json.contains("a@x.com"));
        assert!(!json.contains("password"));
    }

    #[test]
    fn auth_response_carries_token_and_redirect() {
        let user_id = uuid::Uuid::new_v4();
        let token = uuid::Uuid::new_v4();
        let response = AuthResponse {
            token,
            redirect_to: "/meals".to_string(),
            user: PublicUser {
                id: user_id,
                username: "alice".to_string(),
                email: "a@x.com".to_string(),
            },
        };

        let value: serde_json::Value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["token"], serde_json::json!(token.to_string()));
        assert_eq!(value["redirect_to"], "/meals");
        assert_eq!(value["user"]["username"], "alice");
    }
}
