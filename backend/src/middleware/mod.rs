//! Request middleware for trace correlation and session enforcement.

pub mod require_session;
pub mod trace;

pub use require_session::RequireSession;
pub use trace::Trace;
