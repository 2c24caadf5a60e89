//! Domain types for Complaint Desk.
//!
//! These mirror the records the backend returns and the payloads it accepts.

pub mod complaint;
pub mod email;
pub mod feedback;
pub mod id;
pub mod stats;
pub mod status;
pub mod timestamp;
pub mod user;

pub use complaint::{
    BulkAction, Complaint, ComplaintUpdate, DEFAULT_CATEGORY, NewComplaint, clamp_progress,
};
pub use email::{Email, EmailError, EmailRule};
pub use feedback::{Feedback, FeedbackUpdate, NewFeedback, rating_label, truncate_with_ellipsis};
pub use id::*;
pub use stats::{CategoryCount, CategoryDistribution, Insights, Sentiment, Stats};
pub use status::*;
pub use timestamp::{Relative, Timestamp};
pub use user::{AuthResponse, LoginRequest, NewUser, RegisterRequest, User};
