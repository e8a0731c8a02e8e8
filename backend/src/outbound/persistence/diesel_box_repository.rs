//! PostgreSQL-backed `BoxRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{BoxRepository, BoxRepositoryError};
use crate::domain::{BoxId, BoxName, PcBox, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{BoxRow, NewBoxRow};
use super::pool::{DbPool, PoolError};
use super::schema::boxes;

/// Diesel-backed implementation of the box repository port.
#[derive(Clone)]
pub struct DieselBoxRepository {
    pool: DbPool,
}

impl DieselBoxRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> BoxRepositoryError {
    map_basic_pool_error(error, BoxRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> BoxRepositoryError {
    map_basic_diesel_error(
        error,
        BoxRepositoryError::query,
        BoxRepositoryError::connection,
    )
}

fn row_to_box(row: BoxRow) -> Result<PcBox, BoxRepositoryError> {
    let corrupt = |err: String| BoxRepositoryError::query(format!("invalid box row: {err}"));
    Ok(PcBox {
        id: BoxId::new(i64::from(row.id)).map_err(|err| corrupt(err.to_string()))?,
        user_id: UserId::new(i64::from(row.user_id)).map_err(|err| corrupt(err.to_string()))?,
        name: BoxName::new(row.name).map_err(|err| corrupt(err.to_string()))?,
    })
}

#[async_trait]
impl BoxRepository for DieselBoxRepository {
    async fn create(&self, owner: &UserId, name: &BoxName) -> Result<PcBox, BoxRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::insert_into(boxes::table)
            .values(&NewBoxRow {
                user_id: owner.get(),
                name: name.as_ref(),
            })
            .returning(BoxRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_box(row)
    }

    async fn find_owned(
        &self,
        owner: &UserId,
        box_id: BoxId,
    ) -> Result<Option<PcBox>, BoxRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = boxes::table
            .filter(boxes::id.eq(box_id.get()))
            .filter(boxes::user_id.eq(owner.get()))
            .select(BoxRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_box).transpose()
    }

    async fn list_for_user(&self, owner: &UserId) -> Result<Vec<PcBox>, BoxRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = boxes::table
            .filter(boxes::user_id.eq(owner.get()))
            .order(boxes::id.asc())
            .select(BoxRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_box).collect()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for row conversion.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn valid_row_converts() {
        let converted = row_to_box(BoxRow {
            id: 3,
            user_id: 1,
            name: "Box 1".to_owned(),
        })
        .expect("valid row");
        assert_eq!(converted.id.get(), 3);
        assert_eq!(converted.name.as_ref(), "Box 1");
    }

    #[rstest]
    fn blank_name_is_a_query_error() {
        let err = row_to_box(BoxRow {
            id: 3,
            user_id: 1,
            name: "  ".to_owned(),
        })
        .expect_err("corrupt row");
        assert!(matches!(err, BoxRepositoryError::Query { .. }));
    }
}
