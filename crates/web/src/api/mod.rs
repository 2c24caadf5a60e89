//! Client for the Complaint Desk REST backend.
//!
//! Every call sends and receives JSON. Authenticated calls attach
//! `Authorization: Bearer <token>`; the token is passed per call and never
//! stored in the client. Failures are normalized into [`ApiError`]. There are
//! no retries.
//!
//! # Endpoints
//!
//! ```text
//! POST   /auth/register       register
//! POST   /auth/login          login
//! GET    /auth/me             me
//! GET    /complaints          list_complaints
//! GET    /complaints/{id}     get_complaint
//! POST   /complaints          create_complaint
//! PUT    /complaints/{id}     update_complaint
//! DELETE /complaints/{id}     delete_complaint
//! GET    /feedback            list_feedback
//! POST   /feedback            create_feedback
//! PUT    /feedback/{id}       update_feedback
//! GET    /admin/users         list_users
//! POST   /admin/users         create_user
//! GET    /admin/stats         stats
//! GET    /admin/insights      insights
//! ```

mod error;

pub use error::{ApiError, NETWORK_ERROR, REQUEST_FAILED};

use std::sync::Arc;

use complaintdesk_core::{
    AuthResponse, Complaint, ComplaintUpdate, Feedback, FeedbackUpdate, Insights, LoginRequest,
    NewComplaint, NewFeedback, NewUser, RegisterRequest, Stats, User,
};
use reqwest::{Method, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::{DeserializeOwned, IgnoredAny};
use tracing::instrument;
use url::Url;

use crate::config::WebConfig;

/// Backend REST API client.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is invalid or the HTTP client fails to build.
    pub fn new(config: &WebConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.api_url)
            .map_err(|e| ApiError::Parse(format!("Invalid API URL: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Parse(format!(
                "Invalid API URL: {}",
                config.api_url
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(config.api_timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner { client, base_url }),
        })
    }

    /// Base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Whether the backend answers at all. Any HTTP status counts.
    pub async fn ping(&self) -> bool {
        self.inner
            .client
            .get(self.inner.base_url.clone())
            .send()
            .await
            .is_ok()
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// `POST /auth/register`.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        let builder = self.request(Method::POST, &["auth", "register"], None)?;
        self.send(builder.json(request)).await
    }

    /// `POST /auth/login`.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        let builder = self.request(Method::POST, &["auth", "login"], None)?;
        self.send(builder.json(request)).await
    }

    /// `GET /auth/me`.
    #[instrument(skip_all)]
    pub async fn me(&self, token: &SecretString) -> Result<User, ApiError> {
        self.get(&["auth", "me"], token).await
    }

    // =========================================================================
    // Complaints
    // =========================================================================

    /// `GET /complaints`. Admins get every complaint, others their own.
    #[instrument(skip_all)]
    pub async fn list_complaints(&self, token: &SecretString) -> Result<Vec<Complaint>, ApiError> {
        self.get(&["complaints"], token).await
    }

    /// `GET /complaints/{id}`.
    #[instrument(skip(self, token))]
    pub async fn get_complaint(
        &self,
        token: &SecretString,
        id: &str,
    ) -> Result<Complaint, ApiError> {
        self.get(&["complaints", id], token).await
    }

    /// `POST /complaints`.
    #[instrument(skip(self, token, complaint), fields(title = %complaint.title))]
    pub async fn create_complaint(
        &self,
        token: &SecretString,
        complaint: &NewComplaint,
    ) -> Result<Complaint, ApiError> {
        self.write(Method::POST, &["complaints"], token, complaint)
            .await
    }

    /// `PUT /complaints/{id}`.
    #[instrument(skip(self, token))]
    pub async fn update_complaint(
        &self,
        token: &SecretString,
        id: &str,
        update: &ComplaintUpdate,
    ) -> Result<Complaint, ApiError> {
        self.write(Method::PUT, &["complaints", id], token, update)
            .await
    }

    /// `DELETE /complaints/{id}`.
    #[instrument(skip(self, token))]
    pub async fn delete_complaint(&self, token: &SecretString, id: &str) -> Result<(), ApiError> {
        let builder = self.request(Method::DELETE, &["complaints", id], Some(token))?;
        let _: IgnoredAny = self.send(builder).await?;
        Ok(())
    }

    // =========================================================================
    // Feedback
    // =========================================================================

    /// `GET /feedback`. Admins get every record, others their own.
    #[instrument(skip_all)]
    pub async fn list_feedback(&self, token: &SecretString) -> Result<Vec<Feedback>, ApiError> {
        self.get(&["feedback"], token).await
    }

    /// `POST /feedback`.
    #[instrument(skip(self, token, feedback), fields(rating = feedback.rating))]
    pub async fn create_feedback(
        &self,
        token: &SecretString,
        feedback: &NewFeedback,
    ) -> Result<Feedback, ApiError> {
        self.write(Method::POST, &["feedback"], token, feedback)
            .await
    }

    /// `PUT /feedback/{id}`.
    #[instrument(skip(self, token))]
    pub async fn update_feedback(
        &self,
        token: &SecretString,
        id: &str,
        update: &FeedbackUpdate,
    ) -> Result<Feedback, ApiError> {
        self.write(Method::PUT, &["feedback", id], token, update)
            .await
    }

    // =========================================================================
    // Admin
    // =========================================================================

    /// `GET /admin/users`.
    #[instrument(skip_all)]
    pub async fn list_users(&self, token: &SecretString) -> Result<Vec<User>, ApiError> {
        self.get(&["admin", "users"], token).await
    }

    /// `POST /admin/users`.
    #[instrument(skip(self, token, user), fields(email = %user.email, role = %user.role))]
    pub async fn create_user(&self, token: &SecretString, user: &NewUser) -> Result<User, ApiError> {
        self.write(Method::POST, &["admin", "users"], token, user)
            .await
    }

    /// `GET /admin/stats`.
    #[instrument(skip_all)]
    pub async fn stats(&self, token: &SecretString) -> Result<Stats, ApiError> {
        self.get(&["admin", "stats"], token).await
    }

    /// `GET /admin/insights`.
    #[instrument(skip_all)]
    pub async fn insights(&self, token: &SecretString) -> Result<Insights, ApiError> {
        self.get(&["admin", "insights"], token).await
    }

    // =========================================================================
    // Plumbing
    // =========================================================================

    /// Base URL with `segments` appended, each percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::Parse("API URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(
        &self,
        method: Method,
        segments: &[&str],
        token: Option<&SecretString>,
    ) -> Result<RequestBuilder, ApiError> {
        let builder = self.inner.client.request(method, self.endpoint(segments)?);
        Ok(match token {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        token: &SecretString,
    ) -> Result<T, ApiError> {
        let builder = self.request(Method::GET, segments, Some(token))?;
        self.send(builder).await
    }

    async fn write<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        method: Method,
        segments: &[&str],
        token: &SecretString,
        body: &B,
    ) -> Result<T, ApiError> {
        let builder = self.request(method, segments, Some(token))?;
        self.send(builder.json(body)).await
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder.send().await?;
        let status = response.status();

        if status.is_success() {
            let bytes = response.bytes().await?;
            return serde_json::from_slice(&bytes)
                .map_err(|e| ApiError::Parse(format!("Failed to parse response: {e}")));
        }

        let body = response.bytes().await.unwrap_or_default();
        let error = ApiError::from_body(status.as_u16(), &body);
        tracing::debug!(status = status.as_u16(), error = %error, "Backend returned error");
        Err(error)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(api_url: &str) -> ApiClient {
        ApiClient::new(&WebConfig::for_api(api_url)).unwrap()
    }

    #[test]
    fn test_endpoint_appends_segments() {
        let api = client("http://localhost:5000/api");
        assert_eq!(
            api.endpoint(&["complaints", "abc"]).unwrap().as_str(),
            "http://localhost:5000/api/complaints/abc"
        );
    }

    #[test]
    fn test_endpoint_encodes_ids() {
        let api = client("http://localhost:5000/api");
        let url = api.endpoint(&["complaints", "../admin/users"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/api/complaints/..%2Fadmin%2Fusers"
        );
    }

    #[test]
    fn test_endpoint_with_trailing_slash_base() {
        let api = client("http://localhost:5000/api/");
        assert_eq!(
            api.endpoint(&["auth", "me"]).unwrap().as_str(),
            "http://localhost:5000/api/auth/me"
        );
    }

    #[test]
    fn test_rejects_invalid_base() {
        assert!(ApiClient::new(&WebConfig::for_api("not a url")).is_err());
    }
}
