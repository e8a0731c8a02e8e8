//! Box listing and creation.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{BoxCommand, BoxQuery, BoxRepository, BoxRepositoryError};
use crate::domain::{BoxName, Error, PcBox, UserId};

/// Service implementing the box driving ports.
#[derive(Clone)]
pub struct BoxService {
    boxes: Arc<dyn BoxRepository>,
}

impl BoxService {
    /// Create a new service backed by `boxes`.
    pub fn new(boxes: Arc<dyn BoxRepository>) -> Self {
        Self { boxes }
    }
}

pub(crate) fn map_box_repository_error(error: BoxRepositoryError) -> Error {
    match error {
        BoxRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("box repository unavailable: {message}"))
        }
        BoxRepositoryError::Query { message } => {
            Error::internal(format!("box repository error: {message}"))
        }
    }
}

#[async_trait]
impl BoxCommand for BoxService {
    async fn create_box(&self, user_id: UserId, name: BoxName) -> Result<PcBox, Error> {
        let created = self
            .boxes
            .create(&user_id, &name)
            .await
            .map_err(map_box_repository_error)?;
        info!(%user_id, box_id = %created.id, "box created");
        Ok(created)
    }
}

#[async_trait]
impl BoxQuery for BoxService {
    async fn list_boxes(&self, user_id: UserId) -> Result<Vec<PcBox>, Error> {
        self.boxes
            .list_for_user(&user_id)
            .await
            .map_err(map_box_repository_error)
    }
}
