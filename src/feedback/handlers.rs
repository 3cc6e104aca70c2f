use axum::{extract::State, routing::post, Json, Router};
use tracing::{error, info, instrument};

use crate::{
    error::ApiError,
    feedback::{
        dto::{ContactRequest, FeedbackRequest},
        repo::Feedback,
        services::{contact_body, feedback_body, notification_subject, FEEDBACK_RULES},
    },
    state::AppState,
    validate::run_rules,
};

const CONFIRMATION: &str =
    "Your message has been sent successfully. We'll get back to you shortly.";

pub fn feedback_routes() -> Router<AppState> {
    Router::new()
        .route("/feedback", post(submit_feedback))
        .route("/contact", post(contact_us))
}

/// Persists the feedback row, then sends a best-effort notification. A failed
/// send is reported as plain text; the stored row is kept either way.
#[instrument(skip(state, payload))]
pub async fn submit_feedback(
    State(state): State<AppState>,
    Json(payload): Json<FeedbackRequest>,
) -> Result<String, ApiError> {
    let errors = run_rules(&payload, FEEDBACK_RULES);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let feedback = Feedback::create(
        &state.db,
        payload.name.trim(),
        payload.email.trim(),
        &payload.message,
        payload.rating,
    )
    .await?;
    info!(feedback_id = %feedback.id, rating = feedback.rating, "feedback stored");

    let subject = notification_subject(&feedback.name);
    let body = feedback_body(
        &feedback.name,
        &feedback.email,
        feedback.rating,
        &feedback.message,
    );
    match state.mailer.send(&subject, &body).await {
        Ok(()) => Ok(CONFIRMATION.to_string()),
        Err(e) => {
            error!(error = %e, feedback_id = %feedback.id, "feedback notification failed");
            Ok(format!("Error: {e}"))
        }
    }
}

/// Notification only; persists nothing.
#[instrument(skip(state, payload))]
pub async fn contact_us(
    State(state): State<AppState>,
    Json(payload): Json<ContactRequest>,
) -> Result<String, ApiError> {
    let subject = notification_subject(&payload.name);
    let body = contact_body(&payload.name, &payload.email, &payload.message);
    match state.mailer.send(&subject, &body).await {
        Ok(()) => {
            info!(name = %payload.name, "contact message sent");
            Ok(CONFIRMATION.to_string())
        }
        Err(e) => {
            error!(error = %e, "contact notification failed");
            Ok(format!("Error: {e}"))
        }
    }
}
