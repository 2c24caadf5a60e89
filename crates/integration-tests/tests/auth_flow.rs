//! Integration tests for sign-in, registration and role gating.
//!
//! These tests require:
//! - The backend API running (default `http://localhost:5000/api`)
//! - The web front end running (cargo run -p complaintdesk-web)
//! - Seeded admin and customer accounts in the environment

use complaintdesk_core::Role;
use complaintdesk_integration_tests::{base_url, client, location, signed_in};
use reqwest::StatusCode;

#[tokio::test]
#[ignore = "Requires running web front end"]
async fn test_health() {
    let resp = client()
        .get(format!("{}/health", base_url()))
        .send()
        .await
        .expect("Failed to call health");

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.expect("Failed to read body"), "ok");
}

#[tokio::test]
#[ignore = "Requires running web front end and backend"]
async fn test_login_with_wrong_password_stays_on_login() {
    let resp = client()
        .post(format!("{}/auth/login", base_url()))
        .form(&[("email", "nobody@example.com"), ("password", "not-the-password")])
        .send()
        .await
        .expect("Failed to post login");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("Welcome Back"));
    assert!(body.contains("alert-error"));
}

#[tokio::test]
#[ignore = "Requires running web front end"]
async fn test_register_rejects_bad_email() {
    let resp = client()
        .post(format!("{}/auth/register", base_url()))
        .form(&[
            ("name", "Integration Test"),
            ("email", "bad-email"),
            ("password", "Str0ng!Pass"),
            ("password_confirm", "Str0ng!Pass"),
            ("role", "customer"),
        ])
        .send()
        .await
        .expect("Failed to post registration");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("Please enter a valid email address"));
}

#[tokio::test]
#[ignore = "Requires running web front end and backend"]
async fn test_customer_is_redirected_from_admin_pages() {
    let client = signed_in(Role::Customer).await;

    for path in ["/users", "/insights", "/timeline"] {
        let resp = client
            .get(format!("{}{path}", base_url()))
            .send()
            .await
            .expect("Failed to request admin page");

        assert!(resp.status().is_redirection(), "{path} was not redirected");
        assert_eq!(location(&resp), "/dashboard");
    }
}

#[tokio::test]
#[ignore = "Requires running web front end and backend"]
async fn test_admin_cannot_open_submit() {
    let client = signed_in(Role::Admin).await;
    let resp = client
        .get(format!("{}/submit", base_url()))
        .send()
        .await
        .expect("Failed to request submit page");

    assert_eq!(location(&resp), "/dashboard");
}

#[tokio::test]
#[ignore = "Requires running web front end and backend"]
async fn test_logout_ends_session() {
    let client = signed_in(Role::Customer).await;

    let resp = client
        .post(format!("{}/auth/logout", base_url()))
        .send()
        .await
        .expect("Failed to log out");
    assert_eq!(location(&resp), "/auth/login");

    let resp = client
        .get(format!("{}/dashboard", base_url()))
        .send()
        .await
        .expect("Failed to request dashboard");
    assert_eq!(location(&resp), "/auth/login");
}
