use crate::api::AppState;
use crate::api::middleware::AuthUser;
use crate::api::schemas::premium::{PremiumStatusResponse, VerifyOrderRequest, VerifyOrderResponse};
use crate::error::{AppError, Result};
use axum::{Json, extract::State, response::IntoResponse};

pub async fn premium_status(auth_user: AuthUser, State(state): State<AppState>) -> Result<impl IntoResponse> {
    let status = state.premium_service.status(auth_user.user_id).await?;

    Ok(Json(PremiumStatusResponse::from(status)))
}

/// Verifies a checkout order with the payment provider and, when it has
/// completed, grants the caller a premium entitlement.
///
/// # Errors
/// Returns `AppError::BadRequest` for a blank order id and
/// `AppError::Upstream` when the provider cannot be reached.
pub async fn verify_order(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<VerifyOrderRequest>,
) -> Result<impl IntoResponse> {
    payload.validate().map_err(AppError::BadRequest)?;

    let success = state.premium_service.verify_order(auth_user.user_id, &payload.order_id).await?;

    Ok(Json(VerifyOrderResponse { success }))
}
