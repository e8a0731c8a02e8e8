//! Driving ports for account use-cases: login and registration.
//!
//! Inbound adapters call these to authenticate or enrol users without
//! knowing which persistence or hashing adapters back them, which keeps HTTP
//! handler tests free of I/O.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, User};

/// Domain use-case port for authentication.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the matching user.
    ///
    /// Unknown emails and wrong passwords are indistinguishable to callers.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;
}

/// Domain use-case port for creating accounts.
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Create a user (and their default box) from fresh credentials.
    async fn register(&self, credentials: &LoginCredentials) -> Result<User, Error>;
}
