//! Driving port for issuing, resolving and revoking login sessions.

use async_trait::async_trait;

use crate::domain::{Error, IssuedSession, SessionToken, UserId};

/// Session lifecycle use-cases.
#[async_trait]
pub trait SessionService: Send + Sync {
    /// Open a session for `user_id` and return the bearer token.
    async fn start(&self, user_id: UserId) -> Result<IssuedSession, Error>;

    /// Return the user behind a live token, or `None` for unknown or expired
    /// tokens.
    async fn resolve(&self, token: &SessionToken) -> Result<Option<UserId>, Error>;

    /// Revoke a token immediately. Unknown tokens are ignored.
    async fn end(&self, token: &SessionToken) -> Result<(), Error>;
}
