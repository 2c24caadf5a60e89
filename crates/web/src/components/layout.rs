//! Page chrome shared by every signed-in view: sidebar, top bar, flash
//! messages.

use complaintdesk_core::page::{self, NavEntry, Page};
use serde::Deserialize;

use crate::models::SessionUser;

/// Sidebar and top bar data for one viewer.
#[derive(Debug, Clone)]
pub struct Shell {
    pub user_name: String,
    pub role: &'static str,
    pub role_label: &'static str,
    pub portal_title: &'static str,
    pub subtitle: &'static str,
    pub nav: Vec<NavEntry>,
    /// Key of the page being shown, for highlighting.
    pub active: &'static str,
}

impl Shell {
    #[must_use]
    pub fn new(user: &SessionUser, active: Page) -> Self {
        Self {
            user_name: user.display_name().to_owned(),
            role: user.role.as_str(),
            role_label: user.role.label(),
            portal_title: page::portal_title(user.role),
            subtitle: page::PORTAL_SUBTITLE,
            nav: page::nav_for(user.role),
            active: active.key(),
        }
    }
}

/// Flash messages carried in the redirect query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Flash {
    pub error: Option<String>,
    pub success: Option<String>,
}

impl Flash {
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            success: None,
        }
    }
}
