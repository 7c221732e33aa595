#![allow(clippy::unwrap_used, clippy::panic, clippy::todo, clippy::missing_panics_doc, clippy::must_use_candidate, missing_debug_implementations, clippy::cast_precision_loss, clippy::clone_on_ref_ptr, clippy::match_same_arms, clippy::items_after_statements, unreachable_pub, clippy::print_stdout, clippy::similar_names)]
use axum::http::StatusCode;
use uuid::Uuid;

mod common;

/// Builds a mutual swipe match and returns its id.
async fn build_swipe_match(
    app: &common::TestApp,
    token_a: &str,
    a_id: Uuid,
    token_b: &str,
    b_id: Uuid,
) -> String {
    for (token, target) in [(token_a, b_id), (token_b, a_id)] {
        let resp = app
            .client
            .post(format!("{}/v1/swipe", app.server_url))
            .header("Authorization", format!("Bearer {token}"))
            .json(&serde_json::json!({"swipedUserId": target, "action": "like"}))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let resp = app
        .client
        .get(format!("{}/v1/matches", app.server_url))
        .header("Authorization", format!("Bearer {token_a}"))
        .send()
        .await
        .unwrap();
    let matches: serde_json::Value = resp.json().await.unwrap();
    matches[0]["id"].as_str().unwrap().to_string()
}

async fn send_message(
    app: &common::TestApp,
    token: &str,
    match_id: &str,
    text: &str,
) -> (StatusCode, serde_json::Value) {
    let resp = app
        .client
        .post(format!("{}/v1/messages/{match_id}", app.server_url))
        .header("Authorization", format!("Bearer {token}"))
        .json(&serde_json::json!({"text": text}))
        .send()
        .await
        .unwrap();
    let status = resp.status();
    let body = resp.json().await.unwrap_or(serde_json::Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_participants_exchange_messages_in_order() {
    let Some(app) = common::TestApp::spawn().await else { return };
    let (a_id, token_a) = app.signup("Mia").await;
    let (b_id, token_b) = app.signup("Moe").await;
    let match_id = build_swipe_match(&app, &token_a, a_id, &token_b, b_id).await;

    let (status, sent) = send_message(&app, &token_a, &match_id, "Hey! Loved your profile.").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(sent["matchId"], match_id);
    assert_eq!(sent["senderId"], a_id.to_string());
    assert_eq!(sent["text"], "Hey! Loved your profile.");
    assert!(!sent["id"].as_str().unwrap().is_empty());

    let (status, _) = send_message(&app, &token_b, &match_id, "Right back at you.").await;
    assert_eq!(status, StatusCode::CREATED);

    let resp = app
        .client
        .get(format!("{}/v1/messages/{match_id}", app.server_url))
        .header("Authorization", format!("Bearer {token_b}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let thread: serde_json::Value = resp.json().await.unwrap();
    let thread = thread.as_array().unwrap();
    assert_eq!(thread.len(), 2);
    assert_eq!(thread[0]["text"], "Hey! Loved your profile.");
    assert_eq!(thread[1]["text"], "Right back at you.");

    // The match listing carries the same thread.
    let resp = app
        .client
        .get(format!("{}/v1/matches", app.server_url))
        .header("Authorization", format!("Bearer {token_a}"))
        .send()
        .await
        .unwrap();
    let matches: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(matches[0]["messages"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_blank_message_is_rejected() {
    let Some(app) = common::TestApp::spawn().await else { return };
    let (a_id, token_a) = app.signup("Nan").await;
    let (b_id, token_b) = app.signup("Ned").await;
    let match_id = build_swipe_match(&app, &token_a, a_id, &token_b, b_id).await;

    for payload in [serde_json::json!({"text": "   "}), serde_json::json!({})] {
        let resp = app
            .client
            .post(format!("{}/v1/messages/{match_id}", app.server_url))
            .header("Authorization", format!("Bearer {token_a}"))
            .json(&payload)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_non_participant_cannot_send_or_read() {
    let Some(app) = common::TestApp::spawn().await else { return };
    let (a_id, token_a) = app.signup("Ola").await;
    let (b_id, token_b) = app.signup("Omar").await;
    let (_, token_c) = app.signup("Snoop").await;
    let match_id = build_swipe_match(&app, &token_a, a_id, &token_b, b_id).await;

    let (status, _) = send_message(&app, &token_c, &match_id, "Let me in").await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let resp = app
        .client
        .get(format!("{}/v1/messages/{match_id}", app.server_url))
        .header("Authorization", format!("Bearer {token_c}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_unknown_match_is_not_found() {
    let Some(app) = common::TestApp::spawn().await else { return };
    let (_, token) = app.signup("Pia").await;

    let (status, _) = send_message(&app, &token, &Uuid::new_v4().to_string(), "Anyone?").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reply_on_lapsed_date_match_clears_window() {
    let Some(app) = common::TestApp::spawn().await else { return };
    let (_, author_token) = app.signup("Rosa").await;
    let (_, viewer_token) = app.signup("Remy").await;

    // Build a date match through an interest expression.
    let resp = app
        .client
        .post(format!("{}/v1/date-ideas", app.server_url))
        .header("Authorization", format!("Bearer {author_token}"))
        .json(&serde_json::json!({"title": "Ferry picnic", "description": "Cheese and a sunset."}))
        .send()
        .await
        .unwrap();
    let idea: serde_json::Value = resp.json().await.unwrap();
    let idea_id = idea["id"].as_str().unwrap();

    app.client
        .post(format!("{}/v1/date-ideas/{idea_id}/interest", app.server_url))
        .header("Authorization", format!("Bearer {viewer_token}"))
        .send()
        .await
        .unwrap();

    let resp = app
        .client
        .get(format!("{}/v1/matches", app.server_url))
        .header("Authorization", format!("Bearer {author_token}"))
        .send()
        .await
        .unwrap();
    let matches: serde_json::Value = resp.json().await.unwrap();
    let match_id = matches[0]["id"].as_str().unwrap().to_string();
    assert!(!matches[0]["interestExpiresAt"].is_null());

    // Push the window into the past, then reply.
    sqlx::query("UPDATE matches SET interest_expires_at = NOW() - INTERVAL '1 day' WHERE id = $1")
        .bind(Uuid::parse_str(&match_id).unwrap())
        .execute(&app.pool)
        .await
        .unwrap();

    let (status, _) = send_message(&app, &author_token, &match_id, "Sorry, busy week!").await;
    assert_eq!(status, StatusCode::CREATED);

    // The window is gone for both participants and stays gone.
    for token in [&author_token, &viewer_token] {
        let resp = app
            .client
            .get(format!("{}/v1/matches", app.server_url))
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await
            .unwrap();
        let matches: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(matches[0]["id"], match_id);
        assert!(matches[0]["interestExpiresAt"].is_null());
    }
}
