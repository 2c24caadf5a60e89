//! Presentation building blocks shared by the page templates.

pub mod data_table;
pub mod layout;

pub use layout::{Flash, Shell};
