//! Ticket route handlers.
//!
//! This module contains the ticket list for both portals, the admin detail
//! page with its single-ticket actions, bulk actions and CSV export.

mod actions;
mod bulk;
mod detail;
mod export;
mod list;
pub mod types;

pub use actions::{
    AssignInput, PriorityInput, ProgressInput, StatusInput, TicketDeleteTemplate, assign,
    confirm_delete, delete, priority, progress, status,
};
pub use bulk::{BulkForm, bulk};
pub use detail::{TicketDetailTemplate, show};
pub use export::export;
pub use list::{AdminTicketsTemplate, CustomerTicketsTemplate, index};
pub use types::{TicketRow, TicketsQuery};
