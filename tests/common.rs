use sqlx::PgPool;
use std::net::SocketAddr;
use std::sync::Once;
use tryst_server::api;
use tryst_server::config::{
    AssistConfig, AuthConfig, Config, DatabaseConfig, HealthConfig, LogFormat, MatchingConfig,
    PaypalConfig, PremiumConfig, RateLimitConfig, ServerConfig, TelemetryConfig,
};
use tryst_server::{AppBuilder, storage};
use uuid::Uuid;
use wiremock::MockServer;

static INIT: Once = Once::new();

pub fn setup_tracing() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "warn".into())
            .add_directive("tryst_server=debug".parse().unwrap())
            .add_directive("sqlx=warn".parse().unwrap())
            .add_directive("tower=warn".parse().unwrap())
            .add_directive("hyper=warn".parse().unwrap())
            .add_directive("reqwest=warn".parse().unwrap())
            .add_directive("wiremock=warn".parse().unwrap())
            .add_directive("rustls=warn".parse().unwrap());

        tracing_subscriber::fmt().with_env_filter(filter).init();
    });
}

fn test_database_url() -> Option<String> {
    std::env::var("TRYST_DATABASE_URL").or_else(|_| std::env::var("DATABASE_URL")).ok()
}

#[allow(dead_code)]
pub fn get_test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0, // 0 means let OS choose
            mgmt_port: 0,
            shutdown_timeout_secs: 5,
            trusted_proxies: vec!["127.0.0.1/32".parse().unwrap(), "::1/128".parse().unwrap()],
        },
        database: DatabaseConfig {
            url: test_database_url().unwrap_or_default(),
            max_connections: 5,
            min_connections: 0,
            acquire_timeout_secs: 5,
            idle_timeout_secs: 600,
            max_lifetime_secs: 1800,
        },
        auth: AuthConfig {
            jwt_secret: "test_secret".to_string(),
            access_token_ttl_secs: 3600,
        },
        rate_limit: RateLimitConfig {
            per_second: 10000,
            burst: 10000,
            auth_per_second: 10000,
            auth_burst: 10000,
        },
        matching: MatchingConfig { interest_window_days: 3 },
        premium: PremiumConfig { premium_ttl_days: 30, sweep_interval_secs: 300 },
        paypal: PaypalConfig {
            // Replaced with a mock server URL when the app is spawned.
            api_base: "http://127.0.0.1:9".to_string(),
            client_id: "test-client-id".to_string(),
            client_secret: "test-client-secret".to_string(),
            webhook_id: "WH-TEST".to_string(),
        },
        assist: AssistConfig {
            endpoint: "http://127.0.0.1:9".to_string(),
            api_key: "test-api-key".to_string(),
            model: "gemini-2.5-flash".to_string(),
        },
        health: HealthConfig { db_timeout_ms: 2000 },
        telemetry: TelemetryConfig { otlp_endpoint: None, log_format: LogFormat::Text },
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub server_url: String,
    pub mgmt_url: String,
    pub client: reqwest::Client,
    pub pool: PgPool,
    pub config: Config,
    pub paypal: MockServer,
    pub gemini: MockServer,
    shutdown_tx: tokio::sync::watch::Sender<bool>,
}

impl TestApp {
    /// Spawns the whole application against the database named by
    /// `DATABASE_URL` (or `TRYST_DATABASE_URL`). Returns `None` when neither
    /// is set, so callers can skip.
    pub async fn spawn() -> Option<Self> {
        Self::spawn_with_config(get_test_config()).await
    }

    #[allow(dead_code)]
    pub async fn spawn_with_config(mut config: Config) -> Option<Self> {
        setup_tracing();

        let Some(database_url) = test_database_url() else {
            println!("skipping: set DATABASE_URL to run integration tests against Postgres");
            return None;
        };
        config.database.url = database_url;

        // Every app talks to its own mock PayPal and Gemini so expectations
        // never bleed between tests.
        let paypal = MockServer::start().await;
        let gemini = MockServer::start().await;
        config.paypal.api_base = paypal.uri();
        config.assist.endpoint = gemini.uri();

        let pool = storage::init_pool(&config.database)
            .await
            .expect("Failed to connect to DB. Is Postgres running?");

        // Run migrations automatically
        sqlx::migrate!().run(&pool).await.expect("Failed to run migrations");

        let app = AppBuilder::new(config.clone())
            .with_database(pool.clone())
            .build()
            .expect("Failed to build application");

        let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
        let router = api::app_router(config.clone(), app.services, shutdown_rx);
        let mgmt = api::mgmt_router(api::MgmtState { health_service: app.health_service });

        let listener =
            tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind app listener");
        let addr = listener.local_addr().expect("Failed to read app listener address");
        let mgmt_listener =
            tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind mgmt listener");
        let mgmt_addr = mgmt_listener.local_addr().expect("Failed to read mgmt listener address");

        tokio::spawn(async move {
            axum::serve(listener, router.into_make_service_with_connect_info::<SocketAddr>())
                .await
                .expect("App server crashed");
        });
        tokio::spawn(async move {
            axum::serve(mgmt_listener, mgmt.into_make_service_with_connect_info::<SocketAddr>())
                .await
                .expect("Mgmt server crashed");
        });

        Some(Self {
            server_url: format!("http://{addr}"),
            mgmt_url: format!("http://{mgmt_addr}"),
            client: reqwest::Client::new(),
            pool,
            config,
            paypal,
            gemini,
            shutdown_tx,
        })
    }

    /// Registers a fresh user with a unique email and returns their id and
    /// bearer token.
    #[allow(dead_code)]
    pub async fn signup(&self, name: &str) -> (Uuid, String) {
        let email = format!(
            "{}_{}@example.com",
            name.to_lowercase().replace(' ', "."),
            &Uuid::new_v4().to_string()[..8]
        );
        let resp = self
            .client
            .post(format!("{}/v1/signup", self.server_url))
            .json(&serde_json::json!({
                "name": name,
                "email": email,
                "password": "correct horse battery staple",
            }))
            .send()
            .await
            .expect("Failed to execute signup request");
        assert_eq!(resp.status(), axum::http::StatusCode::CREATED, "signup failed for {name}");

        let body: serde_json::Value = resp.json().await.expect("Failed to parse signup response");
        let id = body["user"]["id"]
            .as_str()
            .expect("signup response missing user id")
            .parse()
            .expect("user id is not a UUID");
        let token = body["token"].as_str().expect("signup response missing token").to_string();
        (id, token)
    }

    /// Marks a user premium directly in the database, sidestepping the
    /// payment flow.
    #[allow(dead_code)]
    pub async fn grant_premium(&self, user_id: Uuid) {
        sqlx::query(
            "INSERT INTO user_premium (user_id, is_premium, expires_at)
             VALUES ($1, TRUE, NOW() + INTERVAL '30 days')
             ON CONFLICT (user_id)
             DO UPDATE SET is_premium = TRUE, expires_at = EXCLUDED.expires_at",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .expect("Failed to grant premium");
    }
}
