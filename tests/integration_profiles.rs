#![allow(clippy::unwrap_used, clippy::panic, clippy::todo, clippy::missing_panics_doc, clippy::must_use_candidate, missing_debug_implementations, clippy::cast_precision_loss, clippy::clone_on_ref_ptr, clippy::match_same_arms, clippy::items_after_statements, unreachable_pub, clippy::print_stdout, clippy::similar_names)]
use axum::http::StatusCode;
use uuid::Uuid;

mod common;

#[tokio::test]
async fn test_update_profile_applies_partial_edit() {
    let Some(app) = common::TestApp::spawn().await else { return };
    let (_, token) = app.signup("Petra").await;

    let resp = app
        .client
        .put(format!("{}/v1/profile", app.server_url))
        .header("Authorization", format!("Bearer {token}"))
        .json(&serde_json::json!({
            "age": 29,
            "bio": "Tea snob, trail runner.",
            "interests": ["tea", "running"],
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["age"], 29);
    assert_eq!(body["bio"], "Tea snob, trail runner.");
    assert_eq!(body["interests"], serde_json::json!(["tea", "running"]));
    // Untouched fields survive the edit.
    assert_eq!(body["name"], "Petra");
    assert_eq!(body["images"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_profile_rejects_unreasonable_age() {
    let Some(app) = common::TestApp::spawn().await else { return };
    let (_, token) = app.signup("Young").await;

    for age in [17, 0, 121] {
        let resp = app
            .client
            .put(format!("{}/v1/profile", app.server_url))
            .header("Authorization", format!("Bearer {token}"))
            .json(&serde_json::json!({"age": age}))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "age {age} should be rejected");
    }
}

#[tokio::test]
async fn test_empty_update_is_a_read() {
    let Some(app) = common::TestApp::spawn().await else { return };
    let (user_id, token) = app.signup("Quiet").await;

    let resp = app
        .client
        .put(format!("{}/v1/profile", app.server_url))
        .header("Authorization", format!("Bearer {token}"))
        .json(&serde_json::json!({}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["id"], user_id.to_string());
    assert_eq!(body["name"], "Quiet");
}

#[tokio::test]
async fn test_get_user_by_id() {
    let Some(app) = common::TestApp::spawn().await else { return };
    let (_, token) = app.signup("Viewer").await;
    let (other_id, _) = app.signup("Other").await;

    let resp = app
        .client
        .get(format!("{}/v1/users/{other_id}", app.server_url))
        .header("Authorization", format!("Bearer {token}"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["id"], other_id.to_string());
    assert_eq!(body["name"], "Other");
}

#[tokio::test]
async fn test_get_unknown_user_is_not_found() {
    let Some(app) = common::TestApp::spawn().await else { return };
    let (_, token) = app.signup("Seeker").await;

    let resp = app
        .client
        .get(format!("{}/v1/users/{}", app.server_url, Uuid::new_v4()))
        .header("Authorization", format!("Bearer {token}"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_candidate_feed_excludes_self_and_swiped() {
    let Some(app) = common::TestApp::spawn().await else { return };
    let (viewer_id, token) = app.signup("Casey").await;
    let (liked_id, _) = app.signup("Liked").await;
    let (passed_id, _) = app.signup("Passed").await;
    let (fresh_id, _) = app.signup("Fresh").await;

    for (target, action) in [(liked_id, "like"), (passed_id, "pass")] {
        let resp = app
            .client
            .post(format!("{}/v1/swipe", app.server_url))
            .header("Authorization", format!("Bearer {token}"))
            .json(&serde_json::json!({"swipedUserId": target, "action": action}))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let resp = app
        .client
        .get(format!("{}/v1/users", app.server_url))
        .header("Authorization", format!("Bearer {token}"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await.unwrap();
    let ids: Vec<&str> =
        body.as_array().unwrap().iter().map(|u| u["id"].as_str().unwrap()).collect();

    assert!(ids.contains(&fresh_id.to_string().as_str()));
    assert!(!ids.contains(&viewer_id.to_string().as_str()), "feed must not contain the viewer");
    assert!(!ids.contains(&liked_id.to_string().as_str()), "liked users leave the feed");
    assert!(!ids.contains(&passed_id.to_string().as_str()), "passed users leave the feed");
}
