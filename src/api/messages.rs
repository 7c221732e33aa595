use crate::api::AppState;
use crate::api::middleware::AuthUser;
use crate::api::schemas::messaging::{Message, SendMessageRequest};
use crate::error::{AppError, Result};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

pub async fn list_messages(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let thread = state.message_service.list(auth_user.user_id, match_id).await?;
    let messages: Vec<Message> = thread.into_iter().map(Message::from).collect();

    Ok(Json(messages))
}

/// Appends a message to a match thread the caller participates in.
///
/// # Errors
/// Returns `AppError::BadRequest` for a blank or oversized text,
/// `AppError::Forbidden` when the caller is not a participant, and
/// `AppError::NotFound` for an unknown match.
pub async fn send_message(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
    Json(payload): Json<SendMessageRequest>,
) -> Result<impl IntoResponse> {
    payload.validate().map_err(AppError::BadRequest)?;

    let message = state.message_service.send(auth_user.user_id, match_id, payload.text).await?;

    Ok((StatusCode::CREATED, Json(Message::from(message))))
}
