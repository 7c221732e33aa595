use crate::domain::premium::PremiumStatus;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PremiumStatusResponse {
    pub is_premium: bool,
    #[serde(with = "time::serde::rfc3339::option")]
    pub expires_at: Option<OffsetDateTime>,
}

impl From<PremiumStatus> for PremiumStatusResponse {
    fn from(status: PremiumStatus) -> Self {
        Self { is_premium: status.is_premium, expires_at: status.expires_at }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOrderRequest {
    #[serde(default)]
    pub order_id: String,
}

impl VerifyOrderRequest {
    /// Validates the order verification payload.
    ///
    /// # Errors
    /// Returns an error message if the order id is missing or blank.
    pub fn validate(&self) -> Result<(), String> {
        if self.order_id.trim().is_empty() {
            return Err("Order id cannot be empty".into());
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct VerifyOrderResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub received: bool,
}
