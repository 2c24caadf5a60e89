//! Authentication route handlers.
//!
//! Email and password sign-in against the backend, self-registration and
//! logout. The backend token is kept in the server-side session only.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use complaintdesk_core::validation::{LoginInput, RegistrationInput};
use complaintdesk_core::{Page, Role};
use tower_sessions::Session;
use tracing::instrument;

use crate::components::Flash;
use crate::error::Result;
use crate::filters;
use crate::middleware::{OptionalAuth, clear_current_user, set_current_user};
use crate::models::SessionUser;
use crate::state::AppState;

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub flash: Flash,
    pub email: String,
}

/// Registration page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub flash: Flash,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub roles: &'static [Role],
}

impl RegisterTemplate {
    fn new(flash: Flash, input: &RegistrationInput) -> Self {
        Self {
            flash,
            name: input.name.clone(),
            email: input.email.clone(),
            role: input.role,
            roles: Role::ALL,
        }
    }
}

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/login", get(login_page).post(login))
        .route("/auth/register", get(register_page).post(register))
        .route("/auth/logout", post(logout))
}

/// Render the login page.
///
/// GET /auth/login
async fn login_page(OptionalAuth(user): OptionalAuth, Query(flash): Query<Flash>) -> Response {
    if user.is_some() {
        return Redirect::to(Page::Dashboard.path()).into_response();
    }
    LoginTemplate {
        flash,
        email: String::new(),
    }
    .into_response()
}

/// Sign in with email and password.
///
/// POST /auth/login
#[instrument(skip(state, session, input), fields(email = %input.email))]
async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(input): Form<LoginInput>,
) -> Result<Response> {
    let request = match input.validate() {
        Ok(request) => request,
        Err(e) => {
            return Ok(LoginTemplate {
                flash: Flash::error(e.to_string()),
                email: input.email,
            }
            .into_response());
        }
    };

    match state.api().login(&request).await {
        Ok(auth) => {
            let user = SessionUser::from(&auth.user);
            set_current_user(&session, &user, &auth.access_token).await?;
            tracing::info!(user_id = %user.id, role = %user.role, "User signed in");
            Ok(Redirect::to(Page::Dashboard.path()).into_response())
        }
        Err(e) => {
            tracing::warn!(error = %e, "Login failed");
            Ok(LoginTemplate {
                flash: Flash::error(e.user_message("Login failed")),
                email: input.email,
            }
            .into_response())
        }
    }
}

/// Render the registration page.
///
/// GET /auth/register
async fn register_page(OptionalAuth(user): OptionalAuth) -> Response {
    if user.is_some() {
        return Redirect::to(Page::Dashboard.path()).into_response();
    }
    RegisterTemplate::new(Flash::default(), &RegistrationInput::default()).into_response()
}

/// Create an account and sign in.
///
/// Nothing is sent to the backend until the form validates.
///
/// POST /auth/register
#[instrument(skip(state, session, input), fields(email = %input.email, role = %input.role))]
async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(input): Form<RegistrationInput>,
) -> Result<Response> {
    let request = match input.validate() {
        Ok(request) => request,
        Err(e) => {
            tracing::debug!(error = %e, "Registration form rejected");
            return Ok(RegisterTemplate::new(Flash::error(e.to_string()), &input).into_response());
        }
    };

    match state.api().register(&request).await {
        Ok(auth) => {
            let user = SessionUser::from(&auth.user);
            set_current_user(&session, &user, &auth.access_token).await?;
            tracing::info!(user_id = %user.id, role = %user.role, "User registered");
            Ok(Redirect::to(Page::Dashboard.path()).into_response())
        }
        Err(e) => {
            tracing::warn!(error = %e, "Registration failed");
            let flash = Flash::error(e.user_message("Registration failed"));
            Ok(RegisterTemplate::new(flash, &input).into_response())
        }
    }
}

/// Logout and clear session.
///
/// POST /auth/logout
async fn logout(session: Session) -> Redirect {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session on logout: {e}");
    }
    Redirect::to(Page::Login.path())
}
