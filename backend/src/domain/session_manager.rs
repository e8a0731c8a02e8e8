//! Session lifecycle service over a pluggable [`SessionStore`].

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tracing::{debug, info, warn};

use crate::domain::ports::{SessionService, SessionStore, SessionStoreError};
use crate::domain::{Error, IssuedSession, SessionRecord, SessionToken, UserId};

/// Issues and resolves sessions that expire after a fixed time-to-live.
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    ttl: Duration,
}

impl SessionManager {
    /// Create a manager that stores sessions in `store` for `ttl`.
    pub fn new(store: Arc<dyn SessionStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// Drop sessions nobody presented again before they expired.
    ///
    /// Failures are logged and swallowed; a stale row never blocks a login.
    async fn purge_expired(&self) {
        match self.store.purge_expired(Utc::now()).await {
            Ok(0) => {}
            Ok(purged) => debug!(purged, "expired sessions purged"),
            Err(error) => warn!(%error, "failed to purge expired sessions"),
        }
    }
}

fn map_store_error(error: SessionStoreError) -> Error {
    match error {
        SessionStoreError::Connection { message } => {
            Error::service_unavailable(format!("session store unavailable: {message}"))
        }
        SessionStoreError::Query { message } => {
            Error::internal(format!("session store error: {message}"))
        }
    }
}

#[async_trait]
impl SessionService for SessionManager {
    async fn start(&self, user_id: UserId) -> Result<IssuedSession, Error> {
        self.purge_expired().await;
        let token = SessionToken::generate();
        let expires_at = Utc::now() + self.ttl;
        self.store
            .set(&token.digest(), &SessionRecord { user_id, expires_at })
            .await
            .map_err(map_store_error)?;
        info!(%user_id, "session started");
        Ok(IssuedSession { token, expires_at })
    }

    async fn resolve(&self, token: &SessionToken) -> Result<Option<UserId>, Error> {
        let digest = token.digest();
        let Some(record) = self.store.get(&digest).await.map_err(map_store_error)? else {
            return Ok(None);
        };

        if record.is_expired_at(Utc::now()) {
            debug!(user_id = %record.user_id, "session expired");
            self.store.delete(&digest).await.map_err(map_store_error)?;
            return Ok(None);
        }
        Ok(Some(record.user_id))
    }

    async fn end(&self, token: &SessionToken) -> Result<(), Error> {
        self.store
            .delete(&token.digest())
            .await
            .map_err(map_store_error)
    }
}
