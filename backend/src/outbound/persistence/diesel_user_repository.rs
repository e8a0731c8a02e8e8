//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Registration inserts the account and its default box in one transaction,
//! so a user without a box is never visible.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{BoxName, Email, NewUser, PasswordHash, StoredUser, User, UserId};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewBoxRow, NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{boxes, users};

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn row_to_stored_user(row: UserRow) -> Result<StoredUser, UserPersistenceError> {
    let UserRow {
        id,
        email,
        password,
    } = row;
    let id = UserId::new(i64::from(id))
        .map_err(|err| UserPersistenceError::query(format!("invalid user id: {err}")))?;
    let email = Email::new(email)
        .map_err(|err| UserPersistenceError::query(format!("invalid stored email: {err}")))?;
    Ok(StoredUser {
        user: User::new(id, email),
        password_hash: PasswordHash::new(password),
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create_with_default_box(
        &self,
        user: &NewUser,
        box_name: &BoxName,
    ) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_user = NewUserRow {
            email: user.email.as_ref(),
            password: user.password_hash.as_str(),
        };

        let row = conn
            .transaction::<UserRow, diesel::result::Error, _>(|conn| {
                async move {
                    let created: UserRow = diesel::insert_into(users::table)
                        .values(&new_user)
                        .returning(UserRow::as_returning())
                        .get_result(conn)
                        .await?;
                    diesel::insert_into(boxes::table)
                        .values(&NewBoxRow {
                            user_id: created.id,
                            name: box_name.as_ref(),
                        })
                        .execute(conn)
                        .await?;
                    Ok(created)
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| {
                if is_unique_violation(&err) {
                    UserPersistenceError::duplicate_email(user.email.as_ref())
                } else {
                    map_diesel_error(err)
                }
            })?;

        row_to_stored_user(row).map(|stored| stored.user)
    }

    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<StoredUser>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_stored_user).transpose()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for row conversion.
    use super::*;
    use rstest::rstest;

    fn row(id: i32, email: &str) -> UserRow {
        UserRow {
            id,
            email: email.to_owned(),
            password: "$2b$04$hash".to_owned(),
        }
    }

    #[rstest]
    fn valid_row_converts() {
        let stored = row_to_stored_user(row(7, "ash@pallet.town")).expect("valid row");
        assert_eq!(stored.user.id().get(), 7);
        assert_eq!(stored.user.email().as_ref(), "ash@pallet.town");
        assert_eq!(stored.password_hash.as_str(), "$2b$04$hash");
    }

    #[rstest]
    #[case(row(0, "ash@pallet.town"))]
    #[case(row(1, "not-an-email"))]
    fn corrupt_rows_are_query_errors(#[case] bad: UserRow) {
        let err = row_to_stored_user(bad).expect_err("corrupt row");
        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }
}
