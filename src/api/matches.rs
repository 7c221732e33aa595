use crate::api::AppState;
use crate::api::middleware::AuthUser;
use crate::api::schemas::matching::Match;
use crate::error::Result;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

pub async fn list_matches(auth_user: AuthUser, State(state): State<AppState>) -> Result<impl IntoResponse> {
    let details = state.matching_service.list_matches(auth_user.user_id).await?;
    let matches: Vec<Match> = details.into_iter().map(Match::from).collect();

    Ok(Json(matches))
}

/// Unmatches the caller from the other participant, removing the thread.
///
/// # Errors
/// Returns `AppError::Forbidden` when the caller is not a participant and
/// `AppError::NotFound` for an unknown match.
pub async fn remove_match(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.matching_service.remove_match(auth_user.user_id, match_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
