//! Concurrent map of live sessions keyed by token digest.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use crate::domain::ports::{SessionStore, SessionStoreError};
use crate::domain::{SessionDigest, SessionRecord};

/// Session store held in process memory; sessions do not survive restarts.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<SessionDigest, SessionRecord>,
}

impl InMemorySessionStore {
    /// Number of stored sessions, expired ones included.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no sessions are stored.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn set(
        &self,
        digest: &SessionDigest,
        record: &SessionRecord,
    ) -> Result<(), SessionStoreError> {
        self.sessions.insert(digest.clone(), *record);
        Ok(())
    }

    async fn get(
        &self,
        digest: &SessionDigest,
    ) -> Result<Option<SessionRecord>, SessionStoreError> {
        Ok(self.sessions.get(digest).map(|entry| *entry.value()))
    }

    async fn delete(&self, digest: &SessionDigest) -> Result<(), SessionStoreError> {
        self.sessions.remove(digest);
        Ok(())
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, SessionStoreError> {
        let before = self.sessions.len();
        self.sessions.retain(|_, record| !record.is_expired_at(now));
        Ok(before.saturating_sub(self.sessions.len()))
    }
}
