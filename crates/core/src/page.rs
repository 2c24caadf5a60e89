//! Pages, who may see them, and the sidebar built from them.
//!
//! Role gating is one table, [`PAGE_ACCESS`], consulted by [`resolve_page`].
//! A page a role may not see resolves to [`Page::Dashboard`].

use crate::types::Role;

/// Every view the application renders, plus the admin action surfaces
/// reached from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Login,
    Dashboard,
    Submit,
    Tickets,
    /// Ticket detail, per-ticket and bulk actions, CSV export.
    TicketManagement,
    /// Marking feedback addressed.
    FeedbackReview,
    Insights,
    Users,
    Timeline,
}

impl Page {
    /// Route the page is served at, or the prefix of its routes.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => "/auth/login",
            Self::Dashboard => "/dashboard",
            Self::Submit => "/submit",
            Self::Tickets | Self::TicketManagement => "/tickets",
            Self::FeedbackReview => "/feedback",
            Self::Insights => "/insights",
            Self::Users => "/users",
            Self::Timeline => "/timeline",
        }
    }

    /// Short key used by templates to highlight the active nav item.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Dashboard | Self::FeedbackReview => "dashboard",
            Self::Submit => "submit",
            Self::Tickets | Self::TicketManagement => "tickets",
            Self::Insights => "insights",
            Self::Users => "users",
            Self::Timeline => "timeline",
        }
    }
}

/// Who may view a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// No session required.
    Public,
    /// Any signed-in role.
    AnyRole,
    /// Signed-in roles using the user portal.
    CustomerOnly,
    /// Administrators only.
    AdminOnly,
}

impl Access {
    #[must_use]
    pub const fn permits(self, role: Role) -> bool {
        match self {
            Self::Public | Self::AnyRole => true,
            Self::CustomerOnly => !role.is_admin(),
            Self::AdminOnly => role.is_admin(),
        }
    }
}

pub const PAGE_ACCESS: [(Page, Access); 9] = [
    (Page::Login, Access::Public),
    (Page::Dashboard, Access::AnyRole),
    (Page::Submit, Access::CustomerOnly),
    (Page::Tickets, Access::AnyRole),
    (Page::TicketManagement, Access::AdminOnly),
    (Page::FeedbackReview, Access::AdminOnly),
    (Page::Insights, Access::AdminOnly),
    (Page::Users, Access::AdminOnly),
    (Page::Timeline, Access::AdminOnly),
];

/// Access rule for `page`. Pages missing from the table are admin-only.
#[must_use]
pub fn access(page: Page) -> Access {
    PAGE_ACCESS
        .iter()
        .find(|(p, _)| *p == page)
        .map_or(Access::AdminOnly, |(_, a)| *a)
}

#[must_use]
pub fn is_allowed(page: Page, role: Role) -> bool {
    access(page).permits(role)
}

/// The page a signed-in `role` actually gets when asking for `requested`.
#[must_use]
pub fn resolve_page(requested: Page, role: Role) -> Page {
    if is_allowed(requested, role) {
        requested
    } else {
        Page::Dashboard
    }
}

/// Sidebar label, fixed or dependent on the viewer's role.
#[derive(Debug, Clone, Copy)]
pub enum NavLabel {
    Static(&'static str),
    Derived(fn(Role) -> &'static str),
}

impl NavLabel {
    #[must_use]
    pub fn resolve(self, role: Role) -> &'static str {
        match self {
            Self::Static(label) => label,
            Self::Derived(f) => f(role),
        }
    }
}

const fn tickets_label(role: Role) -> &'static str {
    if role.is_admin() {
        "Complaint Center"
    } else {
        "My Tickets"
    }
}

/// One sidebar entry.
#[derive(Debug, Clone, Copy)]
pub struct NavItem {
    pub page: Page,
    pub label: NavLabel,
    /// Name of the icon glyph in the stylesheet.
    pub icon: &'static str,
}

pub const NAV_ITEMS: [NavItem; 6] = [
    NavItem {
        page: Page::Dashboard,
        label: NavLabel::Static("Dashboard"),
        icon: "home",
    },
    NavItem {
        page: Page::Submit,
        label: NavLabel::Static("Submit"),
        icon: "plus",
    },
    NavItem {
        page: Page::Tickets,
        label: NavLabel::Derived(tickets_label),
        icon: "ticket",
    },
    NavItem {
        page: Page::Insights,
        label: NavLabel::Static("Feedback Insights"),
        icon: "chart",
    },
    NavItem {
        page: Page::Users,
        label: NavLabel::Static("User Management"),
        icon: "users",
    },
    NavItem {
        page: Page::Timeline,
        label: NavLabel::Static("Timeline Planner"),
        icon: "calendar",
    },
];

/// A nav entry with its label resolved for one viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub page: Page,
    pub label: &'static str,
    pub icon: &'static str,
    pub href: &'static str,
}

impl NavEntry {
    /// Template helper: whether this entry is the current page.
    #[must_use]
    pub fn is(&self, key: &str) -> bool {
        self.page.key() == key
    }
}

/// The sidebar for `role`, in display order.
#[must_use]
pub fn nav_for(role: Role) -> Vec<NavEntry> {
    NAV_ITEMS
        .iter()
        .filter(|item| is_allowed(item.page, role))
        .map(|item| NavEntry {
            page: item.page,
            label: item.label.resolve(role),
            icon: item.icon,
            href: item.page.path(),
        })
        .collect()
}

/// Sidebar heading.
#[must_use]
pub const fn portal_title(role: Role) -> &'static str {
    if role.is_admin() {
        "Admin Panel"
    } else {
        "User Portal"
    }
}

pub const PORTAL_SUBTITLE: &str = "Complaint & Feedback";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_is_sent_to_dashboard_from_admin_pages() {
        for page in [
            Page::TicketManagement,
            Page::FeedbackReview,
            Page::Insights,
            Page::Users,
            Page::Timeline,
        ] {
            assert_eq!(resolve_page(page, Role::Customer), Page::Dashboard);
            assert_eq!(resolve_page(page, Role::Staff), Page::Dashboard);
            assert_eq!(resolve_page(page, Role::Admin), page);
        }
    }

    #[test]
    fn test_admin_cannot_submit() {
        assert_eq!(resolve_page(Page::Submit, Role::Admin), Page::Dashboard);
        assert_eq!(resolve_page(Page::Submit, Role::Customer), Page::Submit);
    }

    #[test]
    fn test_shared_pages_are_open_to_every_role() {
        for role in Role::ALL {
            assert_eq!(resolve_page(Page::Dashboard, *role), Page::Dashboard);
            assert_eq!(resolve_page(Page::Tickets, *role), Page::Tickets);
            assert_eq!(resolve_page(Page::Login, *role), Page::Login);
        }
    }

    #[test]
    fn test_every_page_has_one_rule() {
        for (page, _) in PAGE_ACCESS {
            let count = PAGE_ACCESS.iter().filter(|(p, _)| *p == page).count();
            assert_eq!(count, 1, "{page:?}");
        }
    }

    #[test]
    fn test_nav_labels_depend_on_role() {
        let admin: Vec<&str> = nav_for(Role::Admin).iter().map(|e| e.label).collect();
        assert_eq!(
            admin,
            vec![
                "Dashboard",
                "Complaint Center",
                "Feedback Insights",
                "User Management",
                "Timeline Planner"
            ]
        );

        let customer: Vec<&str> = nav_for(Role::Customer).iter().map(|e| e.label).collect();
        assert_eq!(customer, vec!["Dashboard", "Submit", "My Tickets"]);
    }

    #[test]
    fn test_portal_title() {
        assert_eq!(portal_title(Role::Admin), "Admin Panel");
        assert_eq!(portal_title(Role::Staff), "User Portal");
    }
}
