use crate::api::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

/// Records the outcome of the governor layer for every request, picking up
/// the retry-after hint the limiter attaches to throttled responses.
pub async fn log_rate_limit_events(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let response = next.run(request).await;

    let ratelimit_after = response
        .headers()
        .get("retry-after")
        .or_else(|| response.headers().get("x-ratelimit-after"))
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);

    state.rate_limit_service.log_decision(response.status(), ratelimit_after);

    response
}
