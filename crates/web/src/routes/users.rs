//! User management: directory with filters and the create-user form.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use complaintdesk_core::aggregate::UserCounts;
use complaintdesk_core::filter::{UserFilter, choice};
use complaintdesk_core::validation::NewUserInput;
use complaintdesk_core::{Page, Role, User};
use serde::Deserialize;
use tracing::instrument;

use crate::components::data_table::{DataTableConfig, users_table_config};
use crate::components::{Flash, Shell};
use crate::filters;
use crate::middleware::{RequireAuth, SessionContext};
use crate::routes::{or_default, redirect_success};
use crate::state::AppState;

const CREATE_FAILED: &str = "Failed to create user. Please try again.";

/// Query parameters of `/users`.
#[derive(Debug, Default, Deserialize)]
pub struct UsersQuery {
    pub search: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
}

impl UsersQuery {
    fn filter(&self) -> UserFilter {
        UserFilter {
            search: self.search.clone().unwrap_or_default(),
            role: choice(self.role.as_deref()),
            status: choice(self.status.as_deref()),
        }
    }
}

/// One row of the user directory.
#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: &'static str,
    pub role_label: &'static str,
    pub department: String,
    pub status: &'static str,
    pub status_label: &'static str,
    pub tickets_submitted: u32,
    pub tickets_resolved: u32,
    pub last_login: String,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.as_str().to_owned(),
            name: user.name.clone(),
            email: user.email.as_str().to_owned(),
            role: user.role.as_str(),
            role_label: user.role.label(),
            department: user.department_or_default().to_owned(),
            status: user.status.as_str(),
            status_label: user.status.label(),
            tickets_submitted: user.tickets_submitted.unwrap_or_default(),
            tickets_resolved: user.tickets_resolved.unwrap_or_default(),
            last_login: user.last_login_display(),
        }
    }
}

/// User management template.
#[derive(Template, WebTemplate)]
#[template(path = "users/index.html")]
pub struct UsersTemplate {
    pub shell: Shell,
    pub flash: Flash,
    pub table: DataTableConfig,
    pub rows: Vec<UserRow>,
    pub counts: UserCounts,
    pub search: String,
    pub form: NewUserInput,
    pub roles: &'static [Role],
}

async fn render(
    ctx: &SessionContext,
    state: &AppState,
    query: &UsersQuery,
    flash: Flash,
    form: NewUserInput,
) -> UsersTemplate {
    let users = or_default("users", state.api().list_users(&ctx.token)).await;
    let filter = query.filter();

    UsersTemplate {
        shell: Shell::new(&ctx.user, Page::Users),
        flash,
        table: users_table_config().selected(&[
            ("role", query.role.as_deref()),
            ("status", query.status.as_deref()),
        ]),
        rows: filter.apply(&users).into_iter().map(UserRow::from).collect(),
        counts: UserCounts::from_users(&users),
        search: filter.search,
        form,
        roles: Role::ALL,
    }
}

/// User directory.
///
/// GET /users
#[instrument(skip(ctx, state, flash), fields(user_id = %ctx.user.id))]
pub async fn index(
    RequireAuth(ctx): RequireAuth,
    State(state): State<AppState>,
    Query(query): Query<UsersQuery>,
    Query(flash): Query<Flash>,
) -> UsersTemplate {
    render(&ctx, &state, &query, flash, NewUserInput::default()).await
}

/// Create a user.
///
/// Validation and backend failures re-render the page with the form kept
/// (password cleared).
///
/// POST /users
#[instrument(skip(ctx, state, input), fields(user_id = %ctx.user.id, email = %input.email))]
pub async fn create(
    RequireAuth(ctx): RequireAuth,
    State(state): State<AppState>,
    Form(input): Form<NewUserInput>,
) -> Response {
    let message = match input.validate() {
        Ok(new_user) => match state.api().create_user(&ctx.token, &new_user).await {
            Ok(user) => {
                tracing::info!(created = %user.id, role = %user.role, "User created");
                return redirect_success(Page::Users.path(), "User created successfully!")
                    .into_response();
            }
            Err(e) => {
                tracing::warn!(error = %e, "User creation failed");
                e.user_message(CREATE_FAILED)
            }
        },
        Err(e) => e.to_string(),
    };

    let form = NewUserInput {
        password: String::new(),
        ..input
    };
    render(&ctx, &state, &UsersQuery::default(), Flash::error(message), form)
        .await
        .into_response()
}
