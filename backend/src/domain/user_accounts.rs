//! Account service implementing registration and login.
//!
//! Passwords are hashed through the [`PasswordHasher`] port before they reach
//! the repository, and every new account gets its default box in the same
//! repository call.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    LoginService, PasswordHashError, PasswordHasher, RegistrationService, UserPersistenceError,
    UserRepository,
};
use crate::domain::{BoxName, Error, LoginCredentials, NewUser, User};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Login and registration backed by a user repository and password hasher.
#[derive(Clone)]
pub struct UserAccountService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl UserAccountService {
    /// Create a new service over the given ports.
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }
}

pub(crate) fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { .. } => Error::conflict("Email already registered"),
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}

#[async_trait]
impl LoginService for UserAccountService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let stored = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_persistence_error)?;

        let Some(stored) = stored else {
            debug!("login rejected: unknown email");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let verified = self
            .hasher
            .verify(credentials.password(), &stored.password_hash)
            .await
            .map_err(map_hash_error)?;
        if !verified {
            debug!(user_id = %stored.user.id(), "login rejected: password mismatch");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        Ok(stored.user)
    }
}

#[async_trait]
impl RegistrationService for UserAccountService {
    async fn register(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let password_hash = self
            .hasher
            .hash(credentials.password())
            .await
            .map_err(map_hash_error)?;
        let new_user = NewUser {
            email: credentials.email().clone(),
            password_hash,
        };

        let user = self
            .users
            .create_with_default_box(&new_user, &BoxName::default_box())
            .await
            .map_err(map_user_persistence_error)?;
        info!(user_id = %user.id(), "user registered");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for login and registration flows.
    use super::*;
    use crate::domain::ports::{MockPasswordHasher, MockUserRepository};
    use crate::domain::{Email, ErrorCode, PasswordHash, StoredUser, UserId};
    use rstest::rstest;

    fn credentials() -> LoginCredentials {
        LoginCredentials::try_from_parts("user@email.com", "password").expect("credentials")
    }

    fn user() -> User {
        User::new(
            UserId::new(1).expect("id"),
            Email::new("user@email.com").expect("email"),
        )
    }

    fn service(users: MockUserRepository, hasher: MockPasswordHasher) -> UserAccountService {
        UserAccountService::new(Arc::new(users), Arc::new(hasher))
    }

    #[rstest]
    #[case(true, None)]
    #[case(false, Some(ErrorCode::Unauthorized))]
    #[tokio::test]
    async fn authenticate_checks_the_stored_hash(
        #[case] matches: bool,
        #[case] expected_error: Option<ErrorCode>,
    ) {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().times(1).returning(|_| {
            Ok(Some(StoredUser {
                user: user(),
                password_hash: PasswordHash::new("$2b$04$hash"),
            }))
        });
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_verify()
            .withf(|password, hash| password == "password" && hash.as_str() == "$2b$04$hash")
            .times(1)
            .returning(move |_, _| Ok(matches));

        let result = service(users, hasher).authenticate(&credentials()).await;
        match expected_error {
            None => assert_eq!(result.expect("authenticated"), user()),
            Some(code) => {
                let err = result.expect_err("rejected");
                assert_eq!(err.code(), code);
                assert_eq!(err.message(), INVALID_CREDENTIALS);
            }
        }
    }

    #[rstest]
    #[tokio::test]
    async fn authenticate_unknown_email_skips_hashing() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));
        let mut hasher = MockPasswordHasher::new();
        hasher.expect_verify().never();

        let err = service(users, hasher)
            .authenticate(&credentials())
            .await
            .expect_err("unknown email");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), INVALID_CREDENTIALS);
    }

    #[rstest]
    #[tokio::test]
    async fn register_hashes_and_creates_default_box() {
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .withf(|password| password == "password")
            .returning(|_| Ok(PasswordHash::new("$2b$04$hash")));
        let mut users = MockUserRepository::new();
        users
            .expect_create_with_default_box()
            .withf(|new_user, box_name| {
                new_user.email.as_ref() == "user@email.com"
                    && new_user.password_hash.as_str() == "$2b$04$hash"
                    && box_name.as_ref() == "Box 1"
            })
            .times(1)
            .returning(|_, _| Ok(user()));

        let created = service(users, hasher)
            .register(&credentials())
            .await
            .expect("registered");
        assert_eq!(created, user());
    }

    #[rstest]
    #[case(UserPersistenceError::duplicate_email("user@email.com"), ErrorCode::Conflict)]
    #[case(UserPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(UserPersistenceError::query("syntax"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn register_maps_repository_failures(
        #[case] failure: UserPersistenceError,
        #[case] expected: ErrorCode,
    ) {
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .returning(|_| Ok(PasswordHash::new("$2b$04$hash")));
        let mut users = MockUserRepository::new();
        users
            .expect_create_with_default_box()
            .returning(move |_, _| Err(failure.clone()));

        let err = service(users, hasher)
            .register(&credentials())
            .await
            .expect_err("repository failure");
        assert_eq!(err.code(), expected);
    }
}
