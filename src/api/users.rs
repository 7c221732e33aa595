use crate::api::AppState;
use crate::api::middleware::AuthUser;
use crate::api::schemas::users::{Profile, UpdateProfileRequest};
use crate::error::{AppError, Result};
use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use uuid::Uuid;

/// Lists swipe candidates: every member except the caller and the profiles
/// the caller has already swiped on, newest first.
pub async fn list_users(auth_user: AuthUser, State(state): State<AppState>) -> Result<impl IntoResponse> {
    let candidates = state.account_service.list_candidates(auth_user.user_id).await?;
    let users: Vec<Profile> = candidates.into_iter().map(Profile::from).collect();

    Ok(Json(users))
}

pub async fn get_user(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let profile = state.account_service.get_profile(user_id).await?;

    Ok(Json(Profile::from(profile)))
}

pub async fn get_profile(auth_user: AuthUser, State(state): State<AppState>) -> Result<impl IntoResponse> {
    let profile = state.account_service.get_profile(auth_user.user_id).await?;

    Ok(Json(Profile::from(profile)))
}

/// Applies a partial edit to the caller's own profile and returns the result.
///
/// # Errors
/// Returns `AppError::BadRequest` when a present field fails validation.
pub async fn update_profile(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse> {
    payload.validate().map_err(AppError::BadRequest)?;

    let profile = state.account_service.update_profile(auth_user.user_id, payload.into()).await?;

    Ok(Json(Profile::from(profile)))
}
