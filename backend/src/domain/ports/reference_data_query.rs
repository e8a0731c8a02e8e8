//! Driving port for reading moves and species.
use async_trait::async_trait;

use crate::domain::{Error, Move, Species};

#[async_trait]
pub trait ReferenceDataQuery: Send + Sync {
    /// All moves ordered by id.
    async fn moves(&self) -> Result<Vec<Move>, Error>;

    /// All species ordered by id.
    async fn species(&self) -> Result<Vec<Species>, Error>;
}
