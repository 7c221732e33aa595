use super::{GatewayError, PaymentGateway, WebhookTransmission};
use crate::config::PaypalConfig;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

/// PayPal REST gateway: client-credentials OAuth, Orders v2 lookups, and the
/// verify-webhook-signature call. Point `api_base` at the sandbox host for
/// testing.
#[derive(Clone, Debug)]
pub struct PaypalGateway {
    http: reqwest::Client,
    config: PaypalConfig,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct OrderResponse {
    status: String,
}

#[derive(Deserialize)]
struct VerificationResponse {
    verification_status: String,
}

impl PaypalGateway {
    #[must_use]
    pub fn new(config: PaypalConfig) -> Self {
        Self { http: reqwest::Client::new(), config }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn access_token(&self) -> Result<String, GatewayError> {
        let response = self
            .http
            .post(format!("{}/v1/oauth2/token", self.config.api_base))
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .header(reqwest::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body("grant_type=client_credentials")
            .send()
            .await
            .map_err(anyhow::Error::from)?;

        if !response.status().is_success() {
            return Err(GatewayError::Rejected(format!("token endpoint returned {}", response.status())));
        }

        let token: TokenResponse = response.json().await.map_err(anyhow::Error::from)?;
        Ok(token.access_token)
    }
}

#[async_trait]
impl PaymentGateway for PaypalGateway {
    #[tracing::instrument(level = "debug", skip(self))]
    async fn order_completed(&self, order_id: &str) -> Result<bool, GatewayError> {
        let token = self.access_token().await?;

        let response = self
            .http
            .get(format!("{}/v2/checkout/orders/{order_id}", self.config.api_base))
            .bearer_auth(token)
            .send()
            .await
            .map_err(anyhow::Error::from)?;

        // An unknown order id is a failed verification, not an outage.
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(false);
        }
        if !response.status().is_success() {
            return Err(GatewayError::Rejected(format!("order lookup returned {}", response.status())));
        }

        let order: OrderResponse = response.json().await.map_err(anyhow::Error::from)?;
        Ok(order.status == "COMPLETED")
    }

    #[tracing::instrument(level = "debug", skip(self, transmission, event))]
    async fn verify_webhook(
        &self,
        transmission: &WebhookTransmission,
        event: &serde_json::Value,
    ) -> Result<bool, GatewayError> {
        let token = self.access_token().await?;

        let body = json!({
            "auth_algo": transmission.auth_algo,
            "cert_url": transmission.cert_url,
            "transmission_id": transmission.transmission_id,
            "transmission_sig": transmission.transmission_sig,
            "transmission_time": transmission.transmission_time,
            "webhook_id": self.config.webhook_id,
            "webhook_event": event,
        });

        let response = self
            .http
            .post(format!("{}/v1/notifications/verify-webhook-signature", self.config.api_base))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(anyhow::Error::from)?;

        if !response.status().is_success() {
            return Err(GatewayError::Rejected(format!("webhook verification returned {}", response.status())));
        }

        let verification: VerificationResponse = response.json().await.map_err(anyhow::Error::from)?;
        Ok(verification.verification_status == "SUCCESS")
    }
}
