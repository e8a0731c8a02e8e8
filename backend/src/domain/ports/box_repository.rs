//! Port abstraction for box persistence.
use async_trait::async_trait;

use crate::domain::{BoxId, BoxName, PcBox, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by box repository adapters.
    pub enum BoxRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "box repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "box repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BoxRepository: Send + Sync {
    /// Create a new box for `owner`.
    async fn create(&self, owner: &UserId, name: &BoxName) -> Result<PcBox, BoxRepositoryError>;

    /// Fetch a box only when it belongs to `owner`.
    async fn find_owned(
        &self,
        owner: &UserId,
        box_id: BoxId,
    ) -> Result<Option<PcBox>, BoxRepositoryError>;

    /// All boxes owned by `owner`, ordered by id.
    async fn list_for_user(&self, owner: &UserId) -> Result<Vec<PcBox>, BoxRepositoryError>;
}
