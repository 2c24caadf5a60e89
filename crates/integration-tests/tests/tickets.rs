//! Integration tests for filing and triaging complaints.
//!
//! These tests require:
//! - The backend API running (default `http://localhost:5000/api`)
//! - The web front end running (cargo run -p complaintdesk-web)
//! - Seeded admin and customer accounts in the environment
//!
//! They create complaints and feedback on the backend.

use complaintdesk_core::Role;
use complaintdesk_integration_tests::{base_url, location, signed_in};
use reqwest::StatusCode;
use uuid::Uuid;

/// File a complaint as the customer and return its id.
async fn file_complaint(title: &str) -> String {
    let client = signed_in(Role::Customer).await;
    let resp = client
        .post(format!("{}/submit/complaint", base_url()))
        .form(&[
            ("title", title),
            ("category", "delivery"),
            ("description", "Parcel arrived damaged"),
            ("priority", "medium"),
        ])
        .send()
        .await
        .expect("Failed to submit complaint");

    let target = location(&resp);
    assert!(
        target.starts_with("/submit?kind=complaint&submitted="),
        "Unexpected redirect: {target}"
    );
    target
        .rsplit('=')
        .next()
        .expect("Missing complaint id")
        .to_string()
}

#[tokio::test]
#[ignore = "Requires running web front end and backend"]
async fn test_customer_sees_own_complaint() {
    let title = format!("Integration {}", Uuid::new_v4());
    file_complaint(&title).await;

    let client = signed_in(Role::Customer).await;
    let resp = client
        .get(format!("{}/tickets?tab=complaints", base_url()))
        .send()
        .await
        .expect("Failed to list tickets");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains(&title));
}

#[tokio::test]
#[ignore = "Requires running web front end and backend"]
async fn test_customer_submits_feedback() {
    let client = signed_in(Role::Customer).await;
    let resp = client
        .post(format!("{}/submit/feedback", base_url()))
        .form(&[
            ("rating", "4"),
            ("category", "service"),
            ("comments", "Quick and friendly support"),
        ])
        .send()
        .await
        .expect("Failed to submit feedback");

    assert!(location(&resp).starts_with("/submit?kind=feedback&submitted="));
}

#[tokio::test]
#[ignore = "Requires running web front end and backend"]
async fn test_admin_triages_complaint() {
    let id = file_complaint(&format!("Triage {}", Uuid::new_v4())).await;
    let client = signed_in(Role::Admin).await;
    let ticket = format!("{}/tickets/{id}", base_url());

    let resp = client
        .post(format!("{ticket}/progress"))
        .form(&[("progress", "250")])
        .send()
        .await
        .expect("Failed to log progress");
    assert!(location(&resp).contains("success="));

    let resp = client
        .post(format!("{ticket}/priority"))
        .form(&[("priority", "high")])
        .send()
        .await
        .expect("Failed to change priority");
    assert!(location(&resp).contains("success="));

    let body = client
        .get(&ticket)
        .send()
        .await
        .expect("Failed to load ticket")
        .text()
        .await
        .expect("Failed to read body");
    assert!(body.contains("100% complete"));
    assert!(body.contains("High"));

    let resp = client
        .post(format!("{ticket}/delete"))
        .send()
        .await
        .expect("Failed to delete ticket");
    assert!(location(&resp).starts_with("/tickets?success="));
}

#[tokio::test]
#[ignore = "Requires running web front end and backend"]
async fn test_admin_bulk_resolve() {
    let first = file_complaint(&format!("Bulk A {}", Uuid::new_v4())).await;
    let second = file_complaint(&format!("Bulk B {}", Uuid::new_v4())).await;
    let client = signed_in(Role::Admin).await;

    let resp = client
        .post(format!("{}/tickets/bulk", base_url()))
        .form(&[
            ("ids", first.as_str()),
            ("ids", second.as_str()),
            ("action", "status-resolved"),
        ])
        .send()
        .await
        .expect("Failed to run bulk action");

    assert_eq!(location(&resp), "/tickets?success=Resolved+2+tickets");
}

#[tokio::test]
#[ignore = "Requires running web front end and backend"]
async fn test_admin_exports_csv() {
    let client = signed_in(Role::Admin).await;
    let resp = client
        .get(format!("{}/tickets/export.csv?status=open", base_url()))
        .send()
        .await
        .expect("Failed to export");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.starts_with(
        "id,title,category,priority,status,assigned_to,department,created_at,updated_at,progress"
    ));

    let resp = client
        .get(format!("{}/insights/export.csv", base_url()))
        .send()
        .await
        .expect("Failed to export insights");
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.starts_with("total_feedback,positive,neutral,negative"));
}
