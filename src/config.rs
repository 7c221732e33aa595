use clap::{Args, Parser, ValueEnum};
use ipnetwork::IpNetwork;

#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    #[command(flatten)]
    pub server: ServerConfig,

    #[command(flatten)]
    pub database: DatabaseConfig,

    #[command(flatten)]
    pub auth: AuthConfig,

    #[command(flatten)]
    pub rate_limit: RateLimitConfig,

    #[command(flatten)]
    pub matching: MatchingConfig,

    #[command(flatten)]
    pub premium: PremiumConfig,

    #[command(flatten)]
    pub paypal: PaypalConfig,

    #[command(flatten)]
    pub assist: AssistConfig,

    #[command(flatten)]
    pub health: HealthConfig,

    #[command(flatten)]
    pub telemetry: TelemetryConfig,
}

#[derive(Clone, Debug, Args)]
pub struct ServerConfig {
    /// Host to listen on
    #[arg(long, env = "TRYST_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "TRYST_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Port for the management endpoints (liveness/readiness)
    #[arg(long, env = "TRYST_MGMT_PORT", default_value_t = 3001)]
    pub mgmt_port: u16,

    /// How long to wait for in-flight requests and workers on shutdown
    #[arg(long, env = "TRYST_SHUTDOWN_TIMEOUT_SECS", default_value_t = 30)]
    pub shutdown_timeout_secs: u64,

    /// Comma-separated list of CIDRs to trust for X-Forwarded-For IP extraction
    #[arg(
        long,
        env = "TRYST_TRUSTED_PROXIES",
        default_value = "10.0.0.0/8,172.16.0.0/12,192.168.0.0/16,127.0.0.1/32",
        value_delimiter = ','
    )]
    pub trusted_proxies: Vec<IpNetwork>,
}

#[derive(Clone, Debug, Args)]
pub struct DatabaseConfig {
    /// Database connection URL
    #[arg(long = "database-url", env = "TRYST_DATABASE_URL")]
    pub url: String,

    /// Maximum number of connections in the database pool
    #[arg(long, env = "TRYST_DATABASE_MAX_CONNECTIONS", default_value_t = 10)]
    pub max_connections: u32,

    /// Minimum number of idle connections the pool keeps open
    #[arg(long, env = "TRYST_DATABASE_MIN_CONNECTIONS", default_value_t = 1)]
    pub min_connections: u32,

    /// Timeout for acquiring a connection from the pool in seconds
    #[arg(long, env = "TRYST_DATABASE_ACQUIRE_TIMEOUT_SECS", default_value_t = 5)]
    pub acquire_timeout_secs: u64,

    /// How long a connection may sit idle before being closed, in seconds
    #[arg(long, env = "TRYST_DATABASE_IDLE_TIMEOUT_SECS", default_value_t = 600)]
    pub idle_timeout_secs: u64,

    /// Maximum lifetime of a pooled connection in seconds
    #[arg(long, env = "TRYST_DATABASE_MAX_LIFETIME_SECS", default_value_t = 1800)]
    pub max_lifetime_secs: u64,
}

#[derive(Clone, Debug, Args)]
pub struct AuthConfig {
    /// Secret key for JWT signing
    #[arg(long, env = "TRYST_JWT_SECRET")]
    pub jwt_secret: String,

    /// Access token time-to-live in seconds
    #[arg(long, env = "TRYST_ACCESS_TOKEN_TTL_SECS", default_value_t = 604_800)]
    pub access_token_ttl_secs: u64,
}

#[derive(Clone, Debug, Args)]
pub struct RateLimitConfig {
    /// Requests per second allowed for standard endpoints
    #[arg(long, env = "TRYST_RATE_LIMIT_PER_SECOND", default_value_t = 10)]
    pub per_second: u32,

    /// Burst allowance for standard endpoints
    #[arg(long, env = "TRYST_RATE_LIMIT_BURST", default_value_t = 20)]
    pub burst: u32,

    /// Stricter rate limit for expensive auth-related endpoints (signup/login)
    #[arg(long, env = "TRYST_AUTH_RATE_LIMIT_PER_SECOND", default_value_t = 1)]
    pub auth_per_second: u32,

    /// Burst allowance for expensive auth-related endpoints
    #[arg(long, env = "TRYST_AUTH_RATE_LIMIT_BURST", default_value_t = 3)]
    pub auth_burst: u32,
}

#[derive(Clone, Debug, Args)]
pub struct MatchingConfig {
    /// How long a date-idea match stays open for a first reply, in days
    #[arg(long, env = "TRYST_INTEREST_WINDOW_DAYS", default_value_t = 3)]
    pub interest_window_days: i64,
}

#[derive(Clone, Debug, Args)]
pub struct PremiumConfig {
    /// How long a verified premium purchase lasts, in days
    #[arg(long, env = "TRYST_PREMIUM_TTL_DAYS", default_value_t = 30)]
    pub premium_ttl_days: i64,

    /// How often to sweep lapsed premium grants
    #[arg(long, env = "TRYST_PREMIUM_SWEEP_INTERVAL_SECS", default_value_t = 300)]
    pub sweep_interval_secs: u64,
}

#[derive(Clone, Debug, Args)]
pub struct PaypalConfig {
    /// Base URL of the PayPal REST API (use the sandbox host for testing)
    #[arg(long, env = "TRYST_PAYPAL_API_BASE", default_value = "https://api-m.paypal.com")]
    pub api_base: String,

    /// PayPal REST client ID
    #[arg(long, env = "TRYST_PAYPAL_CLIENT_ID")]
    pub client_id: String,

    /// PayPal REST client secret
    #[arg(long, env = "TRYST_PAYPAL_CLIENT_SECRET")]
    pub client_secret: String,

    /// ID of the webhook registered for CHECKOUT.ORDER.APPROVED events
    #[arg(long, env = "TRYST_PAYPAL_WEBHOOK_ID")]
    pub webhook_id: String,
}

#[derive(Clone, Debug, Args)]
pub struct AssistConfig {
    /// Base URL of the generative language API
    #[arg(
        long,
        env = "TRYST_ASSIST_ENDPOINT",
        default_value = "https://generativelanguage.googleapis.com"
    )]
    pub endpoint: String,

    /// API key for the generative language API
    #[arg(long, env = "TRYST_ASSIST_API_KEY")]
    pub api_key: String,

    /// Model used for text generation
    #[arg(long, env = "TRYST_ASSIST_MODEL", default_value = "gemini-2.5-flash")]
    pub model: String,
}

#[derive(Clone, Debug, Args)]
pub struct HealthConfig {
    /// Timeout for the readiness database check in milliseconds
    #[arg(long, env = "TRYST_HEALTH_DB_TIMEOUT_MS", default_value_t = 2000)]
    pub db_timeout_ms: u64,
}

#[derive(Clone, Debug, Args)]
pub struct TelemetryConfig {
    /// OTLP endpoint to export traces, metrics, and logs to
    #[arg(long, env = "TRYST_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,

    /// Log output format
    #[arg(long, env = "TRYST_LOG_FORMAT", value_enum, default_value = "text")]
    pub log_format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

impl Config {
    pub fn load() -> Self {
        Self::parse()
    }
}
