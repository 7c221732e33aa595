use crate::api::AppState;
use crate::api::middleware::AuthUser;
use crate::api::schemas::swipes::{SwipeRequest, SwipeResponse};
use crate::error::{AppError, Result};
use axum::{Json, extract::State, response::IntoResponse};

/// Records a swipe and reports whether it completed a mutual match.
///
/// # Errors
/// Returns `AppError::BadRequest` for an unknown action or a self-swipe and
/// `AppError::NotFound` when the target does not exist.
pub async fn swipe(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<SwipeRequest>,
) -> Result<impl IntoResponse> {
    let action = payload.action().map_err(AppError::BadRequest)?;

    let matched = state.matching_service.swipe(auth_user.user_id, payload.swiped_user_id, action).await?;

    Ok(Json(SwipeResponse { matched }))
}
