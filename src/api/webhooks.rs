use crate::api::AppState;
use crate::api::schemas::premium::WebhookAck;
use crate::error::Result;
use crate::services::payments::WebhookTransmission;
use axum::{Json, extract::State, http::HeaderMap};
use serde_json::Value;

fn header_string(headers: &HeaderMap, name: &str) -> String {
    headers.get(name).and_then(|v| v.to_str().ok()).unwrap_or_default().to_string()
}

/// Receives payment provider events. Missing signature headers are passed
/// through as blanks and fail verification upstream.
///
/// # Errors
/// Returns `AppError::Forbidden` when the signature does not verify and
/// `AppError::BadRequest` when an approval event carries no usable user id.
pub async fn paypal(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(event): Json<Value>,
) -> Result<Json<WebhookAck>> {
    let transmission = WebhookTransmission {
        transmission_id: header_string(&headers, "paypal-transmission-id"),
        transmission_time: header_string(&headers, "paypal-transmission-time"),
        transmission_sig: header_string(&headers, "paypal-transmission-sig"),
        cert_url: header_string(&headers, "paypal-cert-url"),
        auth_algo: header_string(&headers, "paypal-auth-algo"),
    };

    state.premium_service.handle_webhook(transmission, event).await?;

    Ok(Json(WebhookAck { received: true }))
}
