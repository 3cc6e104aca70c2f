use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use tracing::{error, warn};
use uuid::Uuid;

use crate::auth::repo::Session;
use crate::state::AppState;

/// Resolves the bearer session token to the authenticated user id. Handlers
/// take this as an explicit argument; there is no ambient identity state.
pub struct AuthUser(pub Uuid);

/// The raw bearer token, for handlers that act on the session itself.
pub struct SessionToken(pub Uuid);

fn bearer_token(parts: &Parts) -> Result<Uuid, (StatusCode, String)> {
    let auth = parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or((
            StatusCode::UNAUTHORIZED,
            "missing Authorization header".to_string(),
        ))?;

    // Expect "Bearer <token>"
    let token = auth
        .strip_prefix("Bearer ")
        .or_else(|| auth.strip_prefix("bearer "))
        .ok_or((StatusCode::UNAUTHORIZED, "invalid auth scheme".to_string()))?;

    token
        .parse()
        .map_err(|_| (StatusCode::UNAUTHORIZED, "invalid session token".to_string()))
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = (StatusCode, String);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;

        let user_id = Session::resolve(&state.db, token)
            .await
            .map_err(|e| {
                error!(error = %e, "session lookup failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "session lookup failed".to_string(),
                )
            })?
            .ok_or_else(|| {
                warn!("invalid or expired session");
                (
                    StatusCode::UNAUTHORIZED,
                    "invalid or expired session".to_string(),
                )
            })?;

        Ok(AuthUser(user_id))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for SessionToken {
    type Rejection = (StatusCode, String);

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        bearer_token(parts).map(SessionToken)
    }
}
