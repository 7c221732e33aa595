use crate::api::AppState;
use crate::api::middleware::AuthUser;
use crate::api::schemas::assist::{AssistRequest, AssistResponse};
use crate::error::Result;
use axum::{Json, extract::State, response::IntoResponse};

/// Runs one assist action through the generative-text provider. Premium only.
///
/// # Errors
/// Returns `AppError::Forbidden` without an effective premium entitlement and
/// `AppError::Upstream` when the provider fails or returns malformed output.
pub async fn assist(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<AssistRequest>,
) -> Result<impl IntoResponse> {
    let result = state.assist_service.assist(auth_user.user_id, payload.into_action()).await?;

    Ok(Json(AssistResponse { result }))
}
