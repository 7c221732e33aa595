use crate::config::PremiumConfig;
use crate::domain::premium::PremiumStatus;
use crate::error::{AppError, Result};
use crate::services::payments::{PaymentGateway, WebhookTransmission};
use crate::storage::DbPool;
use crate::storage::premium_repo::PremiumRepository;
use opentelemetry::{KeyValue, global, metrics::Counter};
use std::sync::Arc;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

const ORDER_APPROVED_EVENT: &str = "CHECKOUT.ORDER.APPROVED";

#[derive(Clone, Debug)]
struct Metrics {
    grants_total: Counter<u64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter("tryst-server");
        Self {
            grants_total: meter
                .u64_counter("premium_grants_total")
                .with_description("Total number of premium entitlements granted, by source")
                .build(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct PremiumService {
    config: PremiumConfig,
    pool: DbPool,
    premium_repo: PremiumRepository,
    gateway: Arc<dyn PaymentGateway>,
    metrics: Metrics,
}

impl PremiumService {
    pub fn new(
        config: PremiumConfig,
        pool: DbPool,
        premium_repo: PremiumRepository,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self { config, pool, premium_repo, gateway, metrics: Metrics::new() }
    }

    #[tracing::instrument(skip(self), err(level = "warn"))]
    pub async fn status(&self, user_id: Uuid) -> Result<PremiumStatus> {
        let mut conn = self.pool.acquire().await?;
        let grant = self.premium_repo.find(&mut conn, user_id).await?;
        Ok(PremiumStatus::from_grant(grant.as_ref(), OffsetDateTime::now_utc()))
    }

    /// Confirms a checkout order with the payment gateway and grants premium
    /// when it completed. Returns whether the order checked out.
    #[tracing::instrument(skip(self, order_id), err(level = "warn"))]
    pub async fn verify_order(&self, user_id: Uuid, order_id: &str) -> Result<bool> {
        let completed = self
            .gateway
            .order_completed(order_id)
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))?;

        if !completed {
            tracing::warn!("Order did not verify as completed");
            return Ok(false);
        }

        self.grant(user_id, "order").await?;
        Ok(true)
    }

    /// Processes a payment-gateway webhook. The signature must verify; only
    /// approved checkout orders grant anything, every other event type is
    /// acknowledged and dropped. The buyer's user id travels in the order's
    /// `custom_id`.
    #[tracing::instrument(skip(self, transmission, event), err(level = "warn"))]
    pub async fn handle_webhook(
        &self,
        transmission: WebhookTransmission,
        event: serde_json::Value,
    ) -> Result<()> {
        let verified = self
            .gateway
            .verify_webhook(&transmission, &event)
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))?;
        if !verified {
            tracing::warn!("Webhook signature did not verify");
            return Err(AppError::Forbidden);
        }

        if event.get("event_type").and_then(serde_json::Value::as_str) != Some(ORDER_APPROVED_EVENT) {
            return Ok(());
        }

        let custom_id = event
            .pointer("/resource/purchase_units/0/custom_id")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| AppError::BadRequest("Missing user id in order".to_string()))?;
        let user_id = Uuid::parse_str(custom_id)
            .map_err(|_| AppError::BadRequest("Invalid user id in order".to_string()))?;

        self.grant(user_id, "webhook").await?;
        Ok(())
    }

    #[tracing::instrument(skip(self), err(level = "warn"))]
    async fn grant(&self, user_id: Uuid, source: &'static str) -> Result<()> {
        let expires_at = OffsetDateTime::now_utc() + Duration::days(self.config.premium_ttl_days);

        let mut conn = self.pool.acquire().await?;
        self.premium_repo.upsert_active(&mut conn, user_id, expires_at).await?;

        self.metrics.grants_total.add(1, &[KeyValue::new("source", source)]);
        tracing::info!("Premium entitlement granted");
        Ok(())
    }
}
