//! Port abstraction for the read-only move and species tables.
use async_trait::async_trait;

use crate::domain::{Move, MoveId, Species, SpeciesId};

use super::define_port_error;

define_port_error! {
    /// Errors raised while reading reference data.
    pub enum ReferenceRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "reference repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "reference repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReferenceRepository: Send + Sync {
    /// All moves ordered by id.
    async fn list_moves(&self) -> Result<Vec<Move>, ReferenceRepositoryError>;

    /// All species ordered by id.
    async fn list_species(&self) -> Result<Vec<Species>, ReferenceRepositoryError>;

    /// The subset of `ids` that exist; order is unspecified.
    async fn find_moves(&self, ids: &[MoveId]) -> Result<Vec<Move>, ReferenceRepositoryError>;

    /// Look up one species.
    async fn find_species(
        &self,
        id: SpeciesId,
    ) -> Result<Option<Species>, ReferenceRepositoryError>;
}
