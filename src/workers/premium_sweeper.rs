use crate::config::PremiumConfig;
use crate::error::AppError;
use crate::storage::DbPool;
use crate::storage::premium_repo::PremiumRepository;
use opentelemetry::{global, metrics::Counter};
use std::time::Duration;
use tracing::Instrument;

#[derive(Clone, Debug)]
struct Metrics {
    lapsed_total: Counter<u64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter("tryst-server");
        Self {
            lapsed_total: meter
                .u64_counter("premium_lapsed_total")
                .with_description("Total premium entitlements downgraded after expiry")
                .build(),
        }
    }
}

/// Periodically flips `is_premium` off where the expiry has passed. Reads
/// already treat a lapsed grant as not premium; the sweeper keeps the stored
/// flag from drifting from reality indefinitely.
#[derive(Debug)]
pub struct PremiumSweeperWorker {
    pool: DbPool,
    repo: PremiumRepository,
    config: PremiumConfig,
    metrics: Metrics,
}

impl PremiumSweeperWorker {
    #[must_use]
    pub fn new(pool: DbPool, repo: PremiumRepository, config: PremiumConfig) -> Self {
        Self { pool, repo, config, metrics: Metrics::new() }
    }

    pub async fn run(self, mut shutdown: tokio::sync::watch::Receiver<bool>) {
        let mut interval = tokio::time::interval(Duration::from_secs(self.config.sweep_interval_secs));

        while !*shutdown.borrow() {
            tokio::select! {
                _ = interval.tick() => {
                    if let Err(e) = self.sweep()
                        .instrument(tracing::info_span!("premium_sweep_iteration"))
                        .await
                    {
                        tracing::error!(error = ?e, "Premium sweep iteration failed");
                    }
                }
                _ = shutdown.changed() => {}
            }
        }
        tracing::info!("Premium sweeper loop shutting down...");
    }

    /// Downgrades every lapsed grant.
    ///
    /// # Errors
    /// Returns an error if the database connection or query fails.
    #[tracing::instrument(skip(self), err, fields(downgraded = tracing::field::Empty))]
    pub async fn sweep(&self) -> Result<(), AppError> {
        tracing::debug!("Sweeping lapsed premium entitlements...");

        let mut conn = self.pool.acquire().await?;
        let count = self.repo.expire_lapsed(&mut conn).await?;

        if count > 0 {
            tracing::info!(count = %count, "Downgraded lapsed premium entitlements");
            self.metrics.lapsed_total.add(count, &[]);
            tracing::Span::current().record("downgraded", count);
        }

        Ok(())
    }
}
