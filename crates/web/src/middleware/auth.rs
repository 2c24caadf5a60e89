//! Authentication extractors and session helpers.
//!
//! A session is authenticated when it holds a backend token. The profile
//! stored next to the token is checked against `GET /auth/me` on the first
//! authenticated request after login; if the backend rejects the token the
//! session is cleared and the user is sent back to the login page.
//!
//! Role gating is not done here: the router wraps each group of routes in
//! [`require_page`], which reads `PAGE_ACCESS`.

use axum::{
    extract::{FromRequestParts, Request},
    http::{StatusCode, request::Parts},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use complaintdesk_core::page::{Page, resolve_page};
use secrecy::SecretString;
use tower_sessions::Session;

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::models::{SessionUser, session_keys};
use crate::state::AppState;

/// The signed-in user and their backend token, handed to each handler.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub user: SessionUser,
    pub token: SecretString,
}

/// Extractor that requires a signed-in user of any role.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(RequireAuth(ctx): RequireAuth) -> impl IntoResponse {
///     format!("Welcome back, {}!", ctx.user.name)
/// }
/// ```
pub struct RequireAuth(pub SessionContext);

/// Error returned when a request lacks the required session.
#[derive(Debug)]
pub enum AuthRejection {
    /// Not signed in (or the token was rejected).
    RedirectToLogin,
    /// The session layer is missing or its store failed.
    SessionUnavailable,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to(Page::Login.path()).into_response(),
            Self::SessionUnavailable => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or(AuthRejection::SessionUnavailable)?;

        let token: String = session
            .get(session_keys::ACCESS_TOKEN)
            .await
            .ok()
            .flatten()
            .ok_or(AuthRejection::RedirectToLogin)?;
        let token = SecretString::from(token);

        let verified: bool = session
            .get(session_keys::VERIFIED)
            .await
            .ok()
            .flatten()
            .unwrap_or(false);
        let stored: Option<SessionUser> = session
            .get(session_keys::CURRENT_USER)
            .await
            .ok()
            .flatten();

        let user = match stored {
            Some(user) if verified => user,
            _ => hydrate(&session, state, &token).await?,
        };

        Ok(Self(SessionContext { user, token }))
    }
}

/// Route layer that sends a signed-in user whose role may not view `page`
/// to the page [`resolve_page`] picks instead.
///
/// Requests without a stored user pass through; the handler's
/// [`RequireAuth`] sends them to the login page.
pub async fn require_page(page: Page, request: Request, next: Next) -> Response {
    let session = request.extensions().get::<Session>().cloned();
    let user = match session {
        Some(session) => session
            .get::<SessionUser>(session_keys::CURRENT_USER)
            .await
            .ok()
            .flatten(),
        None => None,
    };

    if let Some(user) = user {
        let resolved = resolve_page(page, user.role);
        if resolved != page {
            tracing::info!(
                user_id = %user.id,
                role = %user.role,
                path = %request.uri().path(),
                "Page not permitted for role, redirecting"
            );
            return Redirect::to(resolved.path()).into_response();
        }
    }

    next.run(request).await
}

/// Extractor that optionally gets the stored user without contacting the
/// backend.
pub struct OptionalAuth(pub Option<SessionUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(session) = parts.extensions.get::<Session>() else {
            return Ok(Self(None));
        };

        let has_token = session
            .get::<String>(session_keys::ACCESS_TOKEN)
            .await
            .ok()
            .flatten()
            .is_some();
        if !has_token {
            return Ok(Self(None));
        }

        let user = session
            .get::<SessionUser>(session_keys::CURRENT_USER)
            .await
            .ok()
            .flatten();
        Ok(Self(user))
    }
}

/// Refresh the stored profile from `GET /auth/me`.
///
/// On failure the session is cleared; there is no retry.
async fn hydrate(
    session: &Session,
    state: &AppState,
    token: &SecretString,
) -> Result<SessionUser, AuthRejection> {
    match state.api().me(token).await {
        Ok(profile) => {
            let user = SessionUser::from(&profile);
            session
                .insert(session_keys::CURRENT_USER, &user)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to store refreshed profile: {e}");
                    AuthRejection::SessionUnavailable
                })?;
            session
                .insert(session_keys::VERIFIED, true)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to mark profile verified: {e}");
                    AuthRejection::SessionUnavailable
                })?;
            set_sentry_user(&user.id, Some(user.email.as_str()));
            tracing::debug!(user_id = %user.id, "Session profile refreshed");
            Ok(user)
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                backend_status = ?e.status(),
                "Stored token rejected, clearing session"
            );
            if let Err(e) = clear_current_user(session).await {
                tracing::error!("Failed to clear session: {e}");
            }
            Err(AuthRejection::RedirectToLogin)
        }
    }
}

/// Helper to store a fresh login in the session.
///
/// Rotates the session id and marks the profile as not yet verified, so the
/// next authenticated request refreshes it from the backend.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &SessionUser,
    token: &str,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(session_keys::ACCESS_TOKEN, token).await?;
    session.insert(session_keys::CURRENT_USER, user).await?;
    session.insert(session_keys::VERIFIED, false).await?;
    set_sentry_user(&user.id, Some(user.email.as_str()));
    Ok(())
}

/// Helper to clear the current user from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<String>(session_keys::ACCESS_TOKEN)
        .await?;
    session
        .remove::<SessionUser>(session_keys::CURRENT_USER)
        .await?;
    session.remove::<bool>(session_keys::VERIFIED).await?;
    clear_sentry_user();
    Ok(())
}
