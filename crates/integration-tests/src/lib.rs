//! Integration tests for Complaint Desk.
//!
//! The tests drive a running web front end (which in turn needs a running
//! backend) over HTTP with a cookie-enabled client. They are `#[ignore]`d by
//! default.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the backend on :5000 and the front end on :3000, then
//! COMPLAINTDESK_ADMIN_EMAIL=admin@example.com \
//! COMPLAINTDESK_ADMIN_PASSWORD=... \
//! COMPLAINTDESK_CUSTOMER_EMAIL=customer@example.com \
//! COMPLAINTDESK_CUSTOMER_PASSWORD=... \
//!     cargo test -p complaintdesk-integration-tests -- --ignored
//! ```
//!
//! # Environment
//!
//! - `COMPLAINTDESK_URL` - Front end under test (default: `http://localhost:3000`)
//! - `COMPLAINTDESK_{ADMIN,CUSTOMER}_{EMAIL,PASSWORD}` - Seeded accounts

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::missing_panics_doc)]

use complaintdesk_core::Role;
use reqwest::{Client, Response, redirect};

/// Base URL of the front end under test.
#[must_use]
pub fn base_url() -> String {
    std::env::var("COMPLAINTDESK_URL")
        .unwrap_or_else(|_| "http://localhost:3000".to_string())
        .trim_end_matches('/')
        .to_string()
}

/// Client that keeps cookies and does not follow redirects, so tests can
/// assert on `Location`.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// Seeded credentials for `role`, from the environment.
#[must_use]
pub fn credentials(role: Role) -> (String, String) {
    let prefix = match role {
        Role::Admin => "COMPLAINTDESK_ADMIN",
        Role::Customer | Role::Staff => "COMPLAINTDESK_CUSTOMER",
    };
    let email = std::env::var(format!("{prefix}_EMAIL"))
        .unwrap_or_else(|_| panic!("{prefix}_EMAIL must be set"));
    let password = std::env::var(format!("{prefix}_PASSWORD"))
        .unwrap_or_else(|_| panic!("{prefix}_PASSWORD must be set"));
    (email, password)
}

/// The `Location` header of a redirect, or an empty string.
#[must_use]
pub fn location(response: &Response) -> String {
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// A signed-in client for a seeded account.
pub async fn signed_in(role: Role) -> Client {
    let client = client();
    let (email, password) = credentials(role);
    let resp = client
        .post(format!("{}/auth/login", base_url()))
        .form(&[("email", email.as_str()), ("password", password.as_str())])
        .send()
        .await
        .expect("Failed to sign in");

    assert!(
        resp.status().is_redirection(),
        "Expected redirect after login, got: {}",
        resp.status()
    );
    assert_eq!(location(&resp), "/dashboard");
    client
}
