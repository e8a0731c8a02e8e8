//! Read access to the shared move and species tables.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{ReferenceDataQuery, ReferenceRepository, ReferenceRepositoryError};
use crate::domain::{Error, Move, Species};

/// Service implementing [`ReferenceDataQuery`].
#[derive(Clone)]
pub struct ReferenceDataService {
    repository: Arc<dyn ReferenceRepository>,
}

impl ReferenceDataService {
    /// Create a new service backed by `repository`.
    pub fn new(repository: Arc<dyn ReferenceRepository>) -> Self {
        Self { repository }
    }
}

pub(crate) fn map_reference_repository_error(error: ReferenceRepositoryError) -> Error {
    match error {
        ReferenceRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("reference data unavailable: {message}"))
        }
        ReferenceRepositoryError::Query { message } => {
            Error::internal(format!("reference data error: {message}"))
        }
    }
}

#[async_trait]
impl ReferenceDataQuery for ReferenceDataService {
    async fn moves(&self) -> Result<Vec<Move>, Error> {
        self.repository
            .list_moves()
            .await
            .map_err(map_reference_repository_error)
    }

    async fn species(&self) -> Result<Vec<Species>, Error> {
        self.repository
            .list_species()
            .await
            .map_err(map_reference_repository_error)
    }
}
