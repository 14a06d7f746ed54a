mod common;

use auth::TokenConfig;
use auth::TokenIssuer;
use chrono::Duration;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "username": "nicola",
            "email": "nicola@example.com",
            "full_name": "Nicola Example",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["username"], "nicola");
    assert_eq!(body["data"]["email"], "nicola@example.com");
    assert_eq!(body["data"]["full_name"], "Nicola Example");
    assert!(body["data"]["id"].is_string());

    // The credential and session fields never appear in a response.
    assert!(body["data"].get("password_hash").is_none());
    assert!(body["data"].get("current_refresh_token").is_none());
}

#[tokio::test]
async fn test_register_normalizes_username() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "username": "  NiCoLa ",
            "email": "nicola@example.com",
            "full_name": "Nicola Example",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["username"], "nicola");
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = TestApp::spawn().await;

    app.post("/api/auth/register")
        .json(&json!({
            "username": "nicola",
            "email": "nicola@example.com",
            "full_name": "Nicola Example",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "username": "nicola",
            "email": "other@example.com",
            "full_name": "Other Example",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));
}

#[tokio::test]
async fn test_register_missing_fields() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "username": "nicola",
            "email": "nicola@example.com",
            "full_name": "   ",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_sets_session_cookies() {
    let app = TestApp::spawn().await;

    app.post("/api/auth/register")
        .json(&json!({
            "username": "nicola",
            "email": "nicola@example.com",
            "full_name": "Nicola Example",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .post("/api/auth/login")
        .json(&json!({
            "username": "nicola",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let cookies: Vec<String> = response
        .headers()
        .get_all("set-cookie")
        .iter()
        .map(|value| value.to_str().unwrap().to_string())
        .collect();

    let access_cookie = cookies
        .iter()
        .find(|cookie| cookie.starts_with("accessToken="))
        .expect("Missing accessToken cookie");
    let refresh_cookie = cookies
        .iter()
        .find(|cookie| cookie.starts_with("refreshToken="))
        .expect("Missing refreshToken cookie");

    assert!(access_cookie.contains("HttpOnly"));
    assert!(access_cookie.contains("Secure"));
    assert!(refresh_cookie.contains("HttpOnly"));
    assert!(refresh_cookie.contains("Secure"));

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["identity"]["username"], "nicola");
    assert!(body["data"]["access_token"].is_string());
    assert!(body["data"]["refresh_token"].is_string());
}

#[tokio::test]
async fn test_login_by_email() {
    let app = TestApp::spawn().await;

    app.post("/api/auth/register")
        .json(&json!({
            "username": "nicola",
            "email": "nicola@example.com",
            "full_name": "Nicola Example",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .post("/api/auth/login")
        .json(&json!({
            "email": "nicola@example.com",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_unknown_username_is_not_found() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/login")
        .json(&json!({
            "username": "nobody",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_login_wrong_password_is_unauthorized() {
    let app = TestApp::spawn().await;

    app.post("/api/auth/register")
        .json(&json!({
            "username": "nicola",
            "email": "nicola@example.com",
            "full_name": "Nicola Example",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .post("/api/auth/login")
        .json(&json!({
            "username": "nicola",
            "password": "wrong_password"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_without_username_or_email_is_bad_request() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/login")
        .json(&json!({
            "username": "",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_guard_resolves_identity_from_bearer_token() {
    let app = TestApp::spawn().await;

    let login = app.register_and_login().await;
    let access_token = login["data"]["access_token"].as_str().unwrap();

    let response = app
        .get_authenticated("/api/accounts/me", access_token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["username"], "nicola");
    assert_eq!(body["data"]["email"], "nicola@example.com");
}

#[tokio::test]
async fn test_guard_accepts_cookie_and_prefers_it_over_header() {
    let app = TestApp::spawn().await;

    let login = app.register_and_login().await;
    let access_token = login["data"]["access_token"].as_str().unwrap();

    // Valid cookie plus a garbage header: the cookie must win.
    let response = app
        .get("/api/accounts/me")
        .header("Cookie", format!("accessToken={}", access_token))
        .header("Authorization", "Bearer garbage")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_guard_rejects_missing_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/accounts/me")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_guard_rejects_expired_token() {
    let app = TestApp::spawn().await;
    app.register_and_login().await;

    // Same secret, expiry already in the past.
    let expired_issuer = TokenIssuer::new(&TokenConfig {
        access_ttl: Duration::seconds(-5),
        ..common::test_token_config()
    });
    let expired = expired_issuer
        .issue_access(
            &uuid::Uuid::new_v4().to_string(),
            "nicola",
            "nicola@example.com",
            "Nicola Example",
        )
        .unwrap();

    let response = app
        .get_authenticated("/api/accounts/me", &expired)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_rotates_the_token_pair() {
    let app = TestApp::spawn().await;

    let login = app.register_and_login().await;
    let refresh_token = login["data"]["refresh_token"].as_str().unwrap().to_string();

    let response = app
        .post("/api/auth/refresh-token")
        .json(&json!({ "refresh_token": refresh_token.clone() }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let rotated = body["data"]["refresh_token"].as_str().unwrap().to_string();
    assert_ne!(rotated, refresh_token);

    // The presented token died with the exchange.
    let reuse = app
        .post("/api/auth/refresh-token")
        .json(&json!({ "refresh_token": refresh_token }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(reuse.status(), StatusCode::UNAUTHORIZED);

    // The replacement is live.
    let again = app
        .post("/api/auth/refresh-token")
        .json(&json!({ "refresh_token": rotated }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(again.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_reads_cookie_before_body() {
    let app = TestApp::spawn().await;

    let login = app.register_and_login().await;
    let refresh_token = login["data"]["refresh_token"].as_str().unwrap();

    let response = app
        .post("/api/auth/refresh-token")
        .header("Cookie", format!("refreshToken={}", refresh_token))
        .json(&json!({ "refresh_token": "garbage" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_without_token_is_unauthorized() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/refresh-token")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_revokes_the_session() {
    let app = TestApp::spawn().await;

    let login = app.register_and_login().await;
    let access_token = login["data"]["access_token"].as_str().unwrap();
    let refresh_token = login["data"]["refresh_token"].as_str().unwrap();

    let response = app
        .post_authenticated("/api/auth/logout", access_token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let cookies: Vec<String> = response
        .headers()
        .get_all("set-cookie")
        .iter()
        .map(|value| value.to_str().unwrap().to_string())
        .collect();
    assert!(cookies.iter().any(|c| c.starts_with("accessToken=")));
    assert!(cookies.iter().any(|c| c.starts_with("refreshToken=")));

    // The stored refresh token was cleared, so rotation now fails.
    let refresh = app
        .post("/api/auth/refresh-token")
        .json(&json!({ "refresh_token": refresh_token }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(refresh.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_change_password_end_to_end() {
    let app = TestApp::spawn().await;

    let login = app.register_and_login().await;
    let access_token = login["data"]["access_token"].as_str().unwrap();
    let refresh_token = login["data"]["refresh_token"].as_str().unwrap();

    let response = app
        .post_authenticated("/api/auth/change-password", access_token)
        .json(&json!({
            "old_password": "pass_word!",
            "new_password": "new_pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    // The pre-change refresh token survives a credential change; checked
    // before any re-login can overwrite it.
    let refresh = app
        .post("/api/auth/refresh-token")
        .json(&json!({ "refresh_token": refresh_token }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(refresh.status(), StatusCode::OK);

    // Old credential is dead, new one works.
    let old_login = app
        .post("/api/auth/login")
        .json(&json!({ "username": "nicola", "password": "pass_word!" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(old_login.status(), StatusCode::UNAUTHORIZED);

    let new_login = app
        .post("/api/auth/login")
        .json(&json!({ "username": "nicola", "password": "new_pass_word!" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(new_login.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_change_password_wrong_old_password() {
    let app = TestApp::spawn().await;

    let login = app.register_and_login().await;
    let access_token = login["data"]["access_token"].as_str().unwrap();

    let response = app
        .post_authenticated("/api/auth/change-password", access_token)
        .json(&json!({
            "old_password": "guess",
            "new_password": "new_pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_profile_update_keeps_the_credential() {
    let app = TestApp::spawn().await;

    let login = app.register_and_login().await;
    let access_token = login["data"]["access_token"].as_str().unwrap();

    let response = app
        .patch_authenticated("/api/accounts/me", access_token)
        .json(&json!({ "email": "renamed@example.com" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["email"], "renamed@example.com");

    // Same password still opens a session: the stored hash was untouched.
    let relogin = app
        .post("/api/auth/login")
        .json(&json!({ "username": "nicola", "password": "pass_word!" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(relogin.status(), StatusCode::OK);
}
