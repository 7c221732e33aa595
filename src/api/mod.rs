use crate::api::rate_limit::log_rate_limit_events;
use crate::config::Config;
use crate::services::account_service::AccountService;
use crate::services::assist_service::AssistService;
use crate::services::auth_service::AuthService;
use crate::services::date_idea_service::DateIdeaService;
use crate::services::health_service::HealthService;
use crate::services::matching_service::MatchingService;
use crate::services::message_service::MessageService;
use crate::services::premium_service::PremiumService;
use crate::services::rate_limit_service::RateLimitService;
use crate::storage::DbPool;
use axum::body::Body;
use axum::http::Request;
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, get, post},
};
use std::sync::Arc;
use tower_governor::GovernorLayer;
use tower_governor::governor::GovernorConfigBuilder;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

pub mod assist;
pub mod auth;
pub mod date_ideas;
pub mod docs;
pub mod health;
pub mod matches;
pub mod messages;
pub mod middleware;
pub mod premium;
pub mod rate_limit;
pub mod schemas;
pub mod swipes;
pub mod users;
pub mod webhooks;

#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Config,
    pub auth_service: AuthService,
    pub account_service: AccountService,
    pub matching_service: MatchingService,
    pub message_service: MessageService,
    pub date_idea_service: DateIdeaService,
    pub premium_service: PremiumService,
    pub assist_service: AssistService,
    pub rate_limit_service: RateLimitService,
    pub shutdown_rx: tokio::sync::watch::Receiver<bool>,
}

#[derive(Clone, Debug)]
pub struct MgmtState {
    pub health_service: HealthService,
}

#[derive(Debug)]
pub struct ServiceContainer {
    pub pool: DbPool,
    pub auth_service: AuthService,
    pub account_service: AccountService,
    pub matching_service: MatchingService,
    pub message_service: MessageService,
    pub date_idea_service: DateIdeaService,
    pub premium_service: PremiumService,
    pub assist_service: AssistService,
    pub rate_limit_service: RateLimitService,
}

/// Configures and returns the primary application router.
///
/// # Panics
/// Panics if the rate limiter configuration cannot be constructed.
pub fn app_router(
    config: Config,
    services: ServiceContainer,
    shutdown_rx: tokio::sync::watch::Receiver<bool>,
) -> Router {
    let std_interval_ns = 1_000_000_000 / config.rate_limit.per_second.max(1);
    let standard_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_nanosecond(u64::from(std_interval_ns))
            .burst_size(config.rate_limit.burst)
            .key_extractor(services.rate_limit_service.extractor.clone())
            .finish()
            .expect("Failed to build standard rate limiter config"),
    );

    // Auth tier: stricter limits for the expensive signup/login paths
    let auth_interval_ns = 1_000_000_000 / config.rate_limit.auth_per_second.max(1);
    let auth_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_nanosecond(u64::from(auth_interval_ns))
            .burst_size(config.rate_limit.auth_burst)
            .key_extractor(services.rate_limit_service.extractor.clone())
            .finish()
            .expect("Failed to build auth rate limiter config"),
    );

    let state = AppState {
        config,
        auth_service: services.auth_service,
        account_service: services.account_service,
        matching_service: services.matching_service,
        message_service: services.message_service,
        date_idea_service: services.date_idea_service,
        premium_service: services.premium_service,
        assist_service: services.assist_service,
        rate_limit_service: services.rate_limit_service,
        shutdown_rx,
    };

    // Sensitive routes with strict limits
    let auth_routes = Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .layer(GovernorLayer::new(auth_conf));

    // Standard routes; the webhook is unauthenticated but signature-checked
    let api_routes = Router::new()
        .route("/users", get(users::list_users))
        .route("/users/{id}", get(users::get_user))
        .route("/profile", get(users::get_profile).put(users::update_profile))
        .route("/swipe", post(swipes::swipe))
        .route("/matches", get(matches::list_matches))
        .route("/matches/{id}", delete(matches::remove_match))
        .route("/messages/{matchId}", get(messages::list_messages).post(messages::send_message))
        .route("/date-ideas", get(date_ideas::list_date_ideas).post(date_ideas::create_date_idea))
        .route("/date-ideas/{id}/interest", post(date_ideas::express_interest))
        .route("/premium-status", get(premium::premium_status))
        .route("/premium/verify", post(premium::verify_order))
        .route("/assist", post(assist::assist))
        .route("/webhooks/paypal", post(webhooks::paypal))
        .layer(GovernorLayer::new(standard_conf));

    Router::new()
        .route("/openapi.yaml", get(docs::openapi_yaml))
        .nest("/v1", auth_routes.merge(api_routes))
        .layer(from_fn_with_state(state.clone(), log_rate_limit_events))
        .layer(PropagateRequestIdLayer::new(axum::http::HeaderName::from_static("x-request-id")))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(move |request: &Request<Body>| {
                    let request_id = request
                        .extensions()
                        .get::<tower_http::request_id::RequestId>()
                        .map(|id| id.header_value().to_str().unwrap_or_default())
                        .unwrap_or_default()
                        .to_string();

                    tracing::info_span!(
                        "request",
                        "request_id" = %request_id,
                        "http.request.method" = %request.method(),
                        "url.path" = %request.uri().path(),
                        "http.response.status_code" = tracing::field::Empty,
                        "otel.kind" = "server",
                        "user_id" = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>, latency: std::time::Duration, _span: &tracing::Span| {
                        let status = response.status();
                        tracing::Span::current().record("http.response.status_code", status.as_u16());

                        tracing::info!(
                            latency_ms = %latency.as_millis(),
                            status = %status.as_u16(),
                            "request completed"
                        );
                    },
                )
                .on_failure(|error, _latency, _span: &tracing::Span| {
                    tracing::error!(error = %error, "request failed");
                }),
        )
        .layer(SetRequestIdLayer::new(
            axum::http::HeaderName::from_static("x-request-id"),
            middleware::MakeRequestUuidOrHeader,
        ))
        .with_state(state)
}

pub fn mgmt_router(state: MgmtState) -> Router {
    Router::new().route("/livez", get(health::livez)).route("/readyz", get(health::readyz)).with_state(state)
}
