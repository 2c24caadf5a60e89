//! Complaint Desk Core - domain logic shared by the web front end.
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. Everything the pages compute from fetched records lives here.
//!
//! # Modules
//!
//! - [`types`] - Records, payloads and enums exchanged with the backend
//! - [`validation`] - Form input checks run before any backend call
//! - [`filter`] - Search, filter and sort over ticket and user collections
//! - [`activity`] - Complaints and feedback merged into one list
//! - [`aggregate`] - Dashboard counters and category breakdowns
//! - [`timeline`] - Tickets grouped by creation day
//! - [`export`] - CSV downloads
//! - [`page`] - Page table, role gating and sidebar navigation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod activity;
pub mod aggregate;
pub mod export;
pub mod filter;
pub mod page;
pub mod timeline;
pub mod types;
pub mod validation;

pub use page::{Access, NavEntry, Page, resolve_page};
pub use types::*;
pub use validation::ValidationError;
