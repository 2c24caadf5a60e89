//! Router tests against a stub backend.
//!
//! The stub runs on `127.0.0.1:0`, records every request it receives and
//! answers the handful of endpoints the pages need.

#![allow(clippy::unwrap_used)]

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{HeaderMap, Method, Request, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower::ServiceExt;

use crate::build_router;
use crate::config::WebConfig;
use crate::middleware::{REQUEST_ID_HEADER, SESSION_COOKIE_NAME};
use crate::state::AppState;

const GOOD_PASSWORD: &str = "Str0ng!Pass";

/// One request seen by the stub backend.
#[derive(Debug, Clone)]
struct Recorded {
    method: String,
    path: String,
    authorization: Option<String>,
    body: Value,
}

type Calls = Arc<Mutex<Vec<Recorded>>>;

fn profile(role: &str) -> Value {
    json!({
        "id": format!("u-{role}"),
        "name": format!("Test {role}"),
        "email": format!("{role}@example.com"),
        "role": role,
    })
}

async fn stub_backend(
    State(calls): State<Calls>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let path = uri.path().to_owned();

    calls.lock().await.push(Recorded {
        method: method.to_string(),
        path: path.clone(),
        authorization: authorization.clone(),
        body: body.clone(),
    });

    let role = match authorization.as_deref() {
        Some("Bearer token-admin") => "admin",
        _ => "customer",
    };

    match (method.as_str(), path.as_str()) {
        ("POST", "/api/auth/login") => {
            if body["password"] == GOOD_PASSWORD {
                let email = body["email"].as_str().unwrap_or_default();
                let role = if email.starts_with("admin") {
                    "admin"
                } else {
                    "customer"
                };
                // A token the backend will refuse on the next `/auth/me`.
                let token = if email.starts_with("revoked") {
                    "token-revoked".to_owned()
                } else {
                    format!("token-{role}")
                };
                Json(json!({
                    "access_token": token,
                    "user": profile(role),
                    "message": "Login successful",
                }))
                .into_response()
            } else {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({"error": "Invalid credentials"})),
                )
                    .into_response()
            }
        }
        ("GET", "/api/auth/me") if authorization.as_deref() == Some("Bearer token-revoked") => {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": "Token has been revoked"})),
            )
                .into_response()
        }
        ("GET", "/api/auth/me") => Json(profile(role)).into_response(),
        ("GET", "/api/complaints" | "/api/feedback" | "/api/admin/users") => {
            Json(json!([])).into_response()
        }
        ("GET", "/api/admin/stats") => Json(json!({})).into_response(),
        ("PUT", p) if p.starts_with("/api/complaints/") => {
            let id = p.trim_start_matches("/api/complaints/");
            Json(json!({"_id": id, "title": "Updated"})).into_response()
        }
        _ => (StatusCode::NOT_FOUND, Json(json!({"error": "Not found"}))).into_response(),
    }
}

async fn start_stub(calls: Calls) -> SocketAddr {
    let app = Router::new().fallback(stub_backend).with_state(calls);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

struct Harness {
    app: Router,
    calls: Calls,
}

impl Harness {
    async fn new() -> Self {
        let calls = Calls::default();
        let addr = start_stub(calls.clone()).await;
        let config = WebConfig::for_api(&format!("http://{addr}/api"));
        let app = build_router(AppState::new(config).unwrap());
        Self { app, calls }
    }

    async fn send(&self, request: Request<Body>) -> Response {
        self.app.clone().oneshot(request).await.unwrap()
    }

    async fn get(&self, uri: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder().method(Method::GET).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    async fn post_form(&self, uri: &str, cookie: Option<&str>, form: &str) -> Response {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        self.send(builder.body(Body::from(form.to_owned())).unwrap())
            .await
    }

    /// Sign in and return the `name=value` session cookie.
    async fn sign_in(&self, email: &str) -> String {
        let form = format!("email={email}&password=Str0ng%21Pass");
        let response = self.post_form("/auth/login", None, &form).await;
        assert_eq!(location(&response), "/dashboard");
        session_cookie(&response)
    }

    async fn calls(&self) -> Vec<Recorded> {
        self.calls.lock().await.clone()
    }

    async fn clear_calls(&self) {
        self.calls.lock().await.clear();
    }
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

fn session_cookie(response: &Response) -> String {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(SESSION_COOKIE_NAME))
        .and_then(|v| v.split(';').next())
        .unwrap()
        .to_owned()
}

async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_health_endpoints() {
    let harness = Harness::new().await;

    let response = harness.get("/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");

    let response = harness.get("/health/ready", None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_security_headers_and_request_id() {
    let harness = Harness::new().await;
    let response = harness.get("/auth/login", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("x-frame-options").unwrap(), "DENY");
    assert!(response.headers().get("content-security-policy").is_some());
    assert!(response.headers().get(REQUEST_ID_HEADER).is_some());
}

#[tokio::test]
async fn test_signed_out_visitor_is_sent_to_login() {
    let harness = Harness::new().await;

    let response = harness.get("/dashboard", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/auth/login");

    let response = harness.get("/", None).await;
    assert_eq!(location(&response), "/auth/login");
}

#[tokio::test]
async fn test_login_failure_stays_on_login() {
    let harness = Harness::new().await;
    let response = harness
        .post_form("/auth/login", None, "email=dana%40example.com&password=wrong")
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Invalid credentials"));
    assert!(html.contains("dana@example.com"));
}

#[tokio::test]
async fn test_login_success_redirects_to_dashboard() {
    let harness = Harness::new().await;
    let response = harness
        .post_form(
            "/auth/login",
            None,
            "email=customer%40example.com&password=Str0ng%21Pass",
        )
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");
    let cookie = session_cookie(&response);

    let response = harness.get("/dashboard", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Welcome back, Test customer!"));
    assert!(html.contains("User Portal"));

    let calls = harness.calls().await;
    assert!(
        calls
            .iter()
            .any(|c| c.path == "/api/auth/me"
                && c.authorization.as_deref() == Some("Bearer token-customer"))
    );
}

#[tokio::test]
async fn test_customer_cannot_open_admin_pages() {
    let harness = Harness::new().await;
    let cookie = harness.sign_in("customer%40example.com").await;
    harness.clear_calls().await;

    let response = harness.get("/users", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");

    let calls = harness.calls().await;
    assert!(calls.iter().all(|c| c.path != "/api/admin/users"));
}

#[tokio::test]
async fn test_page_access_gates_every_admin_route_for_customers() {
    let harness = Harness::new().await;
    let cookie = harness.sign_in("customer%40example.com").await;
    harness.clear_calls().await;

    for uri in [
        "/insights",
        "/insights/export.csv",
        "/insights/print",
        "/timeline",
        "/users",
        "/tickets/t1",
        "/tickets/t1/delete",
        "/tickets/export.csv",
    ] {
        let response = harness.get(uri, Some(&cookie)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&response), "/dashboard", "{uri}");
    }

    for (uri, form) in [
        ("/tickets/bulk", "ids=t1&action=status-resolved"),
        ("/tickets/t1/status", "status=resolved"),
        ("/tickets/t1/delete", ""),
        ("/feedback/f1/status", ""),
        ("/users", "name=Eve&email=eve%40example.com&role=admin"),
    ] {
        let response = harness.post_form(uri, Some(&cookie), form).await;
        assert_eq!(location(&response), "/dashboard", "{uri}");
    }

    assert!(harness.calls().await.is_empty());
}

#[tokio::test]
async fn test_admin_is_sent_away_from_submit() {
    let harness = Harness::new().await;
    let cookie = harness.sign_in("admin%40example.com").await;
    harness.clear_calls().await;

    let response = harness.get("/submit", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");

    let response = harness
        .post_form(
            "/submit/complaint",
            Some(&cookie),
            "title=Late&category=delivery&priority=high&description=Still+waiting",
        )
        .await;
    assert_eq!(location(&response), "/dashboard");
    assert!(harness.calls().await.iter().all(|c| c.method != "POST"));

    let response = harness.get("/insights", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_rejected_token_clears_session() {
    let harness = Harness::new().await;
    let cookie = harness.sign_in("revoked%40example.com").await;
    harness.clear_calls().await;

    let response = harness.get("/dashboard", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/auth/login");

    let response = harness.get("/tickets", Some(&cookie)).await;
    assert_eq!(location(&response), "/auth/login");
    let response = harness.get("/", Some(&cookie)).await;
    assert_eq!(location(&response), "/auth/login");

    let me_calls = harness
        .calls()
        .await
        .iter()
        .filter(|c| c.path == "/api/auth/me")
        .count();
    assert_eq!(me_calls, 1);
}

#[tokio::test]
async fn test_register_rejects_bad_email_without_backend_call() {
    let harness = Harness::new().await;
    let response = harness
        .post_form(
            "/auth/register",
            None,
            "name=Test+User&email=bad-email&password=Str0ng%21Pass\
             &password_confirm=Str0ng%21Pass&role=customer",
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Please enter a valid email address"));
    assert!(harness.calls().await.is_empty());
}

#[tokio::test]
async fn test_bulk_resolve_sends_one_update_per_ticket() {
    let harness = Harness::new().await;
    let cookie = harness.sign_in("admin%40example.com").await;
    harness.clear_calls().await;

    let response = harness
        .post_form(
            "/tickets/bulk",
            Some(&cookie),
            "ids=t1&ids=t2&ids=t1&ids=t3&action=status-resolved",
        )
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("/tickets?success="));

    let puts: Vec<Recorded> = harness
        .calls()
        .await
        .into_iter()
        .filter(|c| c.method == "PUT")
        .collect();
    let paths: Vec<&str> = puts.iter().map(|c| c.path.as_str()).collect();
    assert_eq!(
        paths,
        vec!["/api/complaints/t1", "/api/complaints/t2", "/api/complaints/t3"]
    );
    for call in &puts {
        assert_eq!(call.body, json!({"status": "resolved", "progress": 100}));
    }
}

#[tokio::test]
async fn test_bulk_redirect_keeps_list_filters() {
    let harness = Harness::new().await;
    let cookie = harness.sign_in("admin%40example.com").await;

    let response = harness
        .post_form(
            "/tickets/bulk?status=open&priority=high&sort=title&dir=asc",
            Some(&cookie),
            "ids=t1&action=priority-high",
        )
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(
        location(&response)
            .starts_with("/tickets?status=open&priority=high&sort=title&dir=asc&success=")
    );
}

#[tokio::test]
async fn test_bulk_without_selection_sends_nothing() {
    let harness = Harness::new().await;
    let cookie = harness.sign_in("admin%40example.com").await;
    harness.clear_calls().await;

    let response = harness
        .post_form("/tickets/bulk", Some(&cookie), "action=status-resolved")
        .await;

    assert_eq!(location(&response), "/tickets?error=No+tickets+selected");
    assert!(harness.calls().await.iter().all(|c| c.method != "PUT"));
}

#[tokio::test]
async fn test_log_progress_is_clamped() {
    let harness = Harness::new().await;
    let cookie = harness.sign_in("admin%40example.com").await;

    for (input, expected) in [("250", 100), ("-5", 0), ("42", 42)] {
        harness.clear_calls().await;
        let response = harness
            .post_form(
                "/tickets/t9/progress",
                Some(&cookie),
                &format!("progress={input}"),
            )
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(location(&response).starts_with("/tickets/t9?success="));

        let calls = harness.calls().await;
        let put = calls.iter().find(|c| c.method == "PUT").unwrap();
        assert_eq!(put.path, "/api/complaints/t9");
        assert_eq!(put.body, json!({"progress": expected}));
    }
}

#[tokio::test]
async fn test_logout_clears_session() {
    let harness = Harness::new().await;
    let cookie = harness.sign_in("customer%40example.com").await;

    let response = harness.post_form("/auth/logout", Some(&cookie), "").await;
    assert_eq!(location(&response), "/auth/login");

    let response = harness.get("/dashboard", Some(&cookie)).await;
    assert_eq!(location(&response), "/auth/login");
}
