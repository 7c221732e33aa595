#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::todo)]
#![warn(clippy::panic)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(unreachable_pub)]
#![warn(missing_debug_implementations)]
#![warn(unused_qualifications)]
#![deny(unused_must_use)]

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod services;
pub mod storage;
pub mod telemetry;
pub mod workers;

use crate::api::ServiceContainer;
use crate::config::Config;
use crate::services::assist::{AssistProvider, GeminiProvider};
use crate::services::payments::{PaymentGateway, PaypalGateway};
use crate::services::{
    AccountService, AssistService, AuthService, DateIdeaService, HealthService, MatchingService,
    MessageService, PremiumService, RateLimitService,
};
use crate::storage::DbPool;
use crate::storage::date_idea_repo::DateIdeaRepository;
use crate::storage::match_repo::MatchRepository;
use crate::storage::message_repo::MessageRepository;
use crate::storage::premium_repo::PremiumRepository;
use crate::storage::swipe_repo::SwipeRepository;
use crate::storage::user_repo::UserRepository;
use crate::workers::PremiumSweeperWorker;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Applies pending database migrations.
///
/// # Errors
/// Returns an error when a migration fails to apply.
pub async fn run_migrations(pool: &DbPool) -> anyhow::Result<()> {
    sqlx::migrate!().run(pool).await?;
    Ok(())
}

/// Routes panic messages through tracing so they land in structured logs
/// instead of bare stderr.
pub fn setup_panic_hook() {
    std::panic::set_hook(Box::new(|panic_info| {
        tracing::error!(panic = %panic_info, "Panic occurred");
    }));
}

/// Flips the shutdown flag on SIGINT or SIGTERM.
pub fn spawn_signal_handler(shutdown_tx: watch::Sender<bool>) {
    tokio::spawn(async move {
        let ctrl_c = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut signal) => {
                    signal.recv().await;
                }
                Err(e) => tracing::error!(error = %e, "Failed to install SIGTERM handler"),
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            () = ctrl_c => {},
            () = terminate => {},
        }

        tracing::info!("Shutdown signal received");
        let _ = shutdown_tx.send(true);
    });
}

/// Background loops that run beside the HTTP servers.
#[derive(Debug)]
pub struct Workers {
    premium_sweeper: PremiumSweeperWorker,
}

impl Workers {
    #[must_use]
    pub fn spawn_all(self, shutdown_rx: watch::Receiver<bool>) -> Vec<JoinHandle<()>> {
        vec![tokio::spawn(self.premium_sweeper.run(shutdown_rx))]
    }
}

/// The wired application: request-facing services, the health checker for
/// the management port, and the background workers.
#[derive(Debug)]
pub struct App {
    pub services: ServiceContainer,
    pub health_service: HealthService,
    pub workers: Workers,
}

/// Wires the service graph from shared resources. The payment gateway and
/// assist provider default to the real clients; tests swap in doubles or
/// point the configured endpoints at a local mock.
#[derive(Debug)]
pub struct AppBuilder {
    config: Config,
    pool: Option<DbPool>,
    payment_gateway: Option<Arc<dyn PaymentGateway>>,
    assist_provider: Option<Arc<dyn AssistProvider>>,
}

impl AppBuilder {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config, pool: None, payment_gateway: None, assist_provider: None }
    }

    #[must_use]
    pub fn with_database(mut self, pool: DbPool) -> Self {
        self.pool = Some(pool);
        self
    }

    #[must_use]
    pub fn with_payment_gateway(mut self, gateway: Arc<dyn PaymentGateway>) -> Self {
        self.payment_gateway = Some(gateway);
        self
    }

    #[must_use]
    pub fn with_assist_provider(mut self, provider: Arc<dyn AssistProvider>) -> Self {
        self.assist_provider = Some(provider);
        self
    }

    /// Builds the application.
    ///
    /// # Errors
    /// Returns an error when the database pool was not supplied.
    pub fn build(self) -> anyhow::Result<App> {
        let pool = self.pool.ok_or_else(|| anyhow::anyhow!("AppBuilder requires a database pool"))?;

        let payment_gateway =
            self.payment_gateway.unwrap_or_else(|| Arc::new(PaypalGateway::new(self.config.paypal.clone())));
        let assist_provider =
            self.assist_provider.unwrap_or_else(|| Arc::new(GeminiProvider::new(self.config.assist.clone())));

        let auth_service = AuthService::new(self.config.auth.clone(), pool.clone(), UserRepository::new());
        let account_service = AccountService::new(pool.clone(), UserRepository::new());
        let matching_service = MatchingService::new(
            pool.clone(),
            UserRepository::new(),
            SwipeRepository::new(),
            MatchRepository::new(),
            MessageRepository::new(),
        );
        let message_service =
            MessageService::new(pool.clone(), MatchRepository::new(), MessageRepository::new());
        let date_idea_service = DateIdeaService::new(
            self.config.matching.clone(),
            pool.clone(),
            DateIdeaRepository::new(),
            MatchRepository::new(),
        );
        let premium_service = PremiumService::new(
            self.config.premium.clone(),
            pool.clone(),
            PremiumRepository::new(),
            payment_gateway,
        );
        let assist_service = AssistService::new(pool.clone(), PremiumRepository::new(), assist_provider);
        let rate_limit_service = RateLimitService::new(self.config.server.trusted_proxies.clone());
        let health_service = HealthService::new(pool.clone(), self.config.health.clone());

        let premium_sweeper =
            PremiumSweeperWorker::new(pool.clone(), PremiumRepository::new(), self.config.premium.clone());

        Ok(App {
            services: ServiceContainer {
                pool,
                auth_service,
                account_service,
                matching_service,
                message_service,
                date_idea_service,
                premium_service,
                assist_service,
                rate_limit_service,
            },
            health_service,
            workers: Workers { premium_sweeper },
        })
    }
}
