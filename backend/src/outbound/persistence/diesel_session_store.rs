//! PostgreSQL-backed `SessionStore` using the `sessions` table.
//!
//! Sessions survive restarts and are shared by every server instance using
//! the same database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{SessionStore, SessionStoreError};
use crate::domain::{SessionDigest, SessionRecord, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::SessionRow;
use super::pool::{DbPool, PoolError};
use super::schema::sessions;

/// Diesel-backed implementation of the session store port.
#[derive(Clone)]
pub struct DieselSessionStore {
    pool: DbPool,
}

impl DieselSessionStore {
    /// Create a new store with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SessionStoreError {
    map_basic_pool_error(error, SessionStoreError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> SessionStoreError {
    map_basic_diesel_error(
        error,
        SessionStoreError::query,
        SessionStoreError::connection,
    )
}

fn row_to_record(row: SessionRow) -> Result<SessionRecord, SessionStoreError> {
    let user_id = UserId::new(i64::from(row.user_id))
        .map_err(|err| SessionStoreError::query(format!("invalid session owner: {err}")))?;
    Ok(SessionRecord {
        user_id,
        expires_at: row.expires_at,
    })
}

#[async_trait]
impl SessionStore for DieselSessionStore {
    async fn set(
        &self,
        digest: &SessionDigest,
        record: &SessionRecord,
    ) -> Result<(), SessionStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(sessions::table)
            .values(&SessionRow {
                digest: digest.as_str().to_owned(),
                user_id: record.user_id.get(),
                expires_at: record.expires_at,
            })
            .on_conflict(sessions::digest)
            .do_update()
            .set((
                sessions::user_id.eq(excluded(sessions::user_id)),
                sessions::expires_at.eq(excluded(sessions::expires_at)),
            ))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn get(
        &self,
        digest: &SessionDigest,
    ) -> Result<Option<SessionRecord>, SessionStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = sessions::table
            .find(digest.as_str())
            .select(SessionRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_record).transpose()
    }

    async fn delete(&self, digest: &SessionDigest) -> Result<(), SessionStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(sessions::table.find(digest.as_str()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, SessionStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(sessions::table.filter(sessions::expires_at.le(now)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)
    }
}
