use async_trait::async_trait;
use thiserror::Error;

pub mod paypal;

pub use paypal::PaypalGateway;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Gateway rejected the request: {0}")]
    Rejected(String),
    #[error("External service error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Headers PayPal stamps on every webhook delivery; the verification call
/// echoes them back alongside the event body.
#[derive(Debug, Clone, Default)]
pub struct WebhookTransmission {
    pub transmission_id: String,
    pub transmission_time: String,
    pub transmission_sig: String,
    pub cert_url: String,
    pub auth_algo: String,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync + std::fmt::Debug {
    /// Whether the checkout order exists and has completed.
    ///
    /// # Errors
    /// Returns `GatewayError` if the gateway cannot be reached or rejects the
    /// credentials.
    async fn order_completed(&self, order_id: &str) -> Result<bool, GatewayError>;

    /// Verifies a webhook delivery's signature against the registered webhook.
    ///
    /// # Errors
    /// Returns `GatewayError` if the verification call itself fails; an intact
    /// call with a bad signature is `Ok(false)`.
    async fn verify_webhook(
        &self,
        transmission: &WebhookTransmission,
        event: &serde_json::Value,
    ) -> Result<bool, GatewayError>;
}
