use crate::api::AppState;
use crate::api::schemas::auth::{AuthResponse, LoginRequest, SignupRequest};
use crate::error::{AppError, Result};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

/// Creates an account and returns the profile with a fresh token.
///
/// # Errors
/// Returns `AppError::BadRequest` when a required field is blank and
/// `AppError::Conflict` when the email is already registered.
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<impl IntoResponse> {
    payload.validate().map_err(AppError::BadRequest)?;

    let (profile, token) = state.auth_service.signup(payload.name, payload.email, payload.password).await?;

    Ok((StatusCode::CREATED, Json(AuthResponse { user: profile.into(), token })))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse> {
    let (profile, token) = state.auth_service.login(payload.email, payload.password).await?;

    Ok(Json(AuthResponse { user: profile.into(), token }))
}
