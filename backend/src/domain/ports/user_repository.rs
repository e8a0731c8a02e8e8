//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{BoxName, Email, NewUser, StoredUser, User};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another account already uses the email address.
        DuplicateEmail { email: String } => "email already registered: {email}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user together with their first box in one unit of work.
    ///
    /// Either both rows exist afterwards or neither does.
    async fn create_with_default_box(
        &self,
        user: &NewUser,
        box_name: &BoxName,
    ) -> Result<User, UserPersistenceError>;

    /// Fetch a user and their password hash by email.
    async fn find_by_email(&self, email: &Email)
    -> Result<Option<StoredUser>, UserPersistenceError>;
}
