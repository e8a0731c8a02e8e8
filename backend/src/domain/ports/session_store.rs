//! Port abstraction for server-side session storage.
//!
//! Stores are keyed by [`SessionDigest`], never by the raw token, so a leaked
//! table cannot be replayed as cookies.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{SessionDigest, SessionRecord};

use super::define_port_error;

define_port_error! {
    /// Errors raised by session store adapters.
    pub enum SessionStoreError {
        /// Store connection could not be established.
        Connection { message: String } => "session store connection failed: {message}",
        /// Read or write failed during execution.
        Query { message: String } => "session store query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Insert or replace the session stored under `digest`.
    async fn set(
        &self,
        digest: &SessionDigest,
        record: &SessionRecord,
    ) -> Result<(), SessionStoreError>;

    /// Fetch the session stored under `digest`.
    async fn get(&self, digest: &SessionDigest)
    -> Result<Option<SessionRecord>, SessionStoreError>;

    /// Remove the session stored under `digest`; absent keys are not an error.
    async fn delete(&self, digest: &SessionDigest) -> Result<(), SessionStoreError>;

    /// Remove every session that expired at or before `now`, returning how
    /// many were dropped.
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, SessionStoreError>;
}
