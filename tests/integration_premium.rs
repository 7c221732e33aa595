#![allow(clippy::unwrap_used, clippy::panic, clippy::todo, clippy::missing_panics_doc, clippy::must_use_candidate, missing_debug_implementations, clippy::cast_precision_loss, clippy::clone_on_ref_ptr, clippy::match_same_arms, clippy::items_after_statements, unreachable_pub, clippy::print_stdout, clippy::similar_names)]
use axum::http::StatusCode;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tryst_server::storage::premium_repo::PremiumRepository;
use tryst_server::workers::PremiumSweeperWorker;
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

async fn mount_paypal_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/v1/oauth2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "test-access-token",
            "token_type": "Bearer",
        })))
        .mount(server)
        .await;
}

async fn mount_order(server: &MockServer, order_id: &str, status: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/v2/checkout/orders/{order_id}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"id": order_id, "status": status})),
        )
        .mount(server)
        .await;
}

async fn mount_webhook_verification(server: &MockServer, verification_status: &str) {
    Mock::given(method("POST"))
        .and(path("/v1/notifications/verify-webhook-signature"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"verification_status": verification_status})),
        )
        .mount(server)
        .await;
}

async fn premium_status(app: &common::TestApp, token: &str) -> serde_json::Value {
    let resp = app
        .client
        .get(format!("{}/v1/premium-status", app.server_url))
        .header("Authorization", format!("Bearer {token}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    resp.json().await.unwrap()
}

fn approved_order_event(user_id: Uuid) -> serde_json::Value {
    serde_json::json!({
        "event_type": "CHECKOUT.ORDER.APPROVED",
        "resource": {
            "purchase_units": [{"custom_id": user_id.to_string()}],
        },
    })
}

async fn post_webhook(app: &common::TestApp, event: &serde_json::Value) -> reqwest::Response {
    app.client
        .post(format!("{}/v1/webhooks/paypal", app.server_url))
        .header("paypal-transmission-id", "t-1")
        .header("paypal-transmission-time", "2026-01-01T00:00:00Z")
        .header("paypal-transmission-sig", "sig")
        .header("paypal-cert-url", "https://api.paypal.com/cert")
        .header("paypal-auth-algo", "SHA256withRSA")
        .json(event)
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_premium_status_defaults_to_free() {
    let Some(app) = common::TestApp::spawn().await else { return };
    let (_, token) = app.signup("Fred").await;

    let status = premium_status(&app, &token).await;
    assert_eq!(status["isPremium"], false);
    assert!(status["expiresAt"].is_null());
}

#[tokio::test]
async fn test_verifying_completed_order_grants_premium() {
    let Some(app) = common::TestApp::spawn().await else { return };
    let (_, token) = app.signup("Vera").await;

    mount_paypal_token(&app.paypal).await;
    mount_order(&app.paypal, "ORDER-GOOD", "COMPLETED").await;

    let before = OffsetDateTime::now_utc();
    let resp = app
        .client
        .post(format!("{}/v1/premium/verify", app.server_url))
        .header("Authorization", format!("Bearer {token}"))
        .json(&serde_json::json!({"orderId": "ORDER-GOOD"}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);

    let status = premium_status(&app, &token).await;
    assert_eq!(status["isPremium"], true);

    let expires = OffsetDateTime::parse(status["expiresAt"].as_str().unwrap(), &Rfc3339).unwrap();
    let ttl = expires - before;
    assert!(ttl > time::Duration::days(29), "ttl too short: {ttl}");
    assert!(ttl < time::Duration::days(31), "ttl too long: {ttl}");
}

#[tokio::test]
async fn test_verifying_pending_order_grants_nothing() {
    let Some(app) = common::TestApp::spawn().await else { return };
    let (_, token) = app.signup("Pend").await;

    mount_paypal_token(&app.paypal).await;
    mount_order(&app.paypal, "ORDER-PENDING", "CREATED").await;

    let resp = app
        .client
        .post(format!("{}/v1/premium/verify", app.server_url))
        .header("Authorization", format!("Bearer {token}"))
        .json(&serde_json::json!({"orderId": "ORDER-PENDING"}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);

    assert_eq!(premium_status(&app, &token).await["isPremium"], false);
}

#[tokio::test]
async fn test_verify_requires_an_order_id() {
    let Some(app) = common::TestApp::spawn().await else { return };
    let (_, token) = app.signup("NoOrder").await;

    let resp = app
        .client
        .post(format!("{}/v1/premium/verify", app.server_url))
        .header("Authorization", format!("Bearer {token}"))
        .json(&serde_json::json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_gateway_outage_does_not_leak_details() {
    let Some(app) = common::TestApp::spawn().await else { return };
    let (_, token) = app.signup("Outage").await;

    // No PayPal mocks mounted: the token request fails.
    let resp = app
        .client
        .post(format!("{}/v1/premium/verify", app.server_url))
        .header("Authorization", format!("Bearer {token}"))
        .json(&serde_json::json!({"orderId": "ORDER-X"}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Internal server error");
}

#[tokio::test]
async fn test_webhook_grants_premium_for_approved_order() {
    let Some(app) = common::TestApp::spawn().await else { return };
    let (user_id, token) = app.signup("Hook").await;

    mount_paypal_token(&app.paypal).await;
    mount_webhook_verification(&app.paypal, "SUCCESS").await;

    let resp = post_webhook(&app, &approved_order_event(user_id)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["received"], true);

    assert_eq!(premium_status(&app, &token).await["isPremium"], true);
}

#[tokio::test]
async fn test_webhook_with_bad_signature_is_forbidden() {
    let Some(app) = common::TestApp::spawn().await else { return };
    let (user_id, token) = app.signup("Forged").await;

    mount_paypal_token(&app.paypal).await;
    mount_webhook_verification(&app.paypal, "FAILURE").await;

    let resp = post_webhook(&app, &approved_order_event(user_id)).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    assert_eq!(premium_status(&app, &token).await["isPremium"], false);
}

#[tokio::test]
async fn test_webhook_acknowledges_unrelated_events() {
    let Some(app) = common::TestApp::spawn().await else { return };
    let (user_id, token) = app.signup("Other").await;

    mount_paypal_token(&app.paypal).await;
    mount_webhook_verification(&app.paypal, "SUCCESS").await;

    let event = serde_json::json!({
        "event_type": "PAYMENT.CAPTURE.DENIED",
        "resource": {"purchase_units": [{"custom_id": user_id.to_string()}]},
    });
    let resp = post_webhook(&app, &event).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(premium_status(&app, &token).await["isPremium"], false);
}

#[tokio::test]
async fn test_webhook_without_buyer_id_is_rejected() {
    let Some(app) = common::TestApp::spawn().await else { return };
    app.signup("Seed").await;

    mount_paypal_token(&app.paypal).await;
    mount_webhook_verification(&app.paypal, "SUCCESS").await;

    let event = serde_json::json!({
        "event_type": "CHECKOUT.ORDER.APPROVED",
        "resource": {"purchase_units": []},
    });
    let resp = post_webhook(&app, &event).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_sweeper_downgrades_lapsed_grants() {
    let Some(app) = common::TestApp::spawn().await else { return };
    let (user_id, token) = app.signup("Lapsed").await;

    sqlx::query(
        "INSERT INTO user_premium (user_id, is_premium, expires_at)
         VALUES ($1, TRUE, NOW() - INTERVAL '1 hour')",
    )
    .bind(user_id)
    .execute(&app.pool)
    .await
    .unwrap();

    // Reads already treat the lapsed grant as free.
    assert_eq!(premium_status(&app, &token).await["isPremium"], false);

    let worker =
        PremiumSweeperWorker::new(app.pool.clone(), PremiumRepository::new(), app.config.premium.clone());
    worker.sweep().await.unwrap();

    let stored: bool =
        sqlx::query_scalar("SELECT is_premium FROM user_premium WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&app.pool)
            .await
            .unwrap();
    assert!(!stored, "sweeper must flip the stored flag off");
}
