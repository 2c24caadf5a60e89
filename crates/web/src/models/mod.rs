//! Request-scoped models shared by middleware and routes.

pub mod session;

pub use session::SessionUser;
pub use session::keys as session_keys;
