//! Driving ports for box management.
use async_trait::async_trait;

use crate::domain::{BoxName, Error, PcBox, UserId};

#[async_trait]
pub trait BoxCommand: Send + Sync {
    /// Create an additional box for the caller.
    async fn create_box(&self, user_id: UserId, name: BoxName) -> Result<PcBox, Error>;
}

#[async_trait]
pub trait BoxQuery: Send + Sync {
    /// All of the caller's boxes ordered by id.
    async fn list_boxes(&self, user_id: UserId) -> Result<Vec<PcBox>, Error>;
}
