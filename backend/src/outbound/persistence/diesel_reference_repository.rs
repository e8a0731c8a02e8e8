//! PostgreSQL-backed `ReferenceRepository` over the seeded `moves` and
//! `species` tables.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ReferenceRepository, ReferenceRepositoryError};
use crate::domain::{Move, MoveId, Species, SpeciesId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{MoveRow, SpeciesRow};
use super::pool::{DbPool, PoolError};
use super::schema::{moves, species};

/// Diesel-backed implementation of the reference data port.
#[derive(Clone)]
pub struct DieselReferenceRepository {
    pool: DbPool,
}

impl DieselReferenceRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ReferenceRepositoryError {
    map_basic_pool_error(error, ReferenceRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ReferenceRepositoryError {
    map_basic_diesel_error(
        error,
        ReferenceRepositoryError::query,
        ReferenceRepositoryError::connection,
    )
}

fn row_to_move(row: MoveRow) -> Result<Move, ReferenceRepositoryError> {
    Ok(Move {
        id: MoveId::new(i64::from(row.id))
            .map_err(|err| ReferenceRepositoryError::query(err.to_string()))?,
        name: row.name,
        move_type: row.move_type,
        power: row.power,
        accuracy: row.accuracy,
        pp: row.pp,
    })
}

fn row_to_species(row: SpeciesRow) -> Result<Species, ReferenceRepositoryError> {
    Ok(Species {
        id: SpeciesId::new(i64::from(row.id))
            .map_err(|err| ReferenceRepositoryError::query(err.to_string()))?,
        name: row.name,
    })
}

#[async_trait]
impl ReferenceRepository for DieselReferenceRepository {
    async fn list_moves(&self) -> Result<Vec<Move>, ReferenceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = moves::table
            .order(moves::id.asc())
            .select(MoveRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_move).collect()
    }

    async fn list_species(&self) -> Result<Vec<Species>, ReferenceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = species::table
            .order(species::id.asc())
            .select(SpeciesRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_species).collect()
    }

    async fn find_moves(&self, ids: &[MoveId]) -> Result<Vec<Move>, ReferenceRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let raw: Vec<i32> = ids.iter().map(|id| id.get()).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = moves::table
            .filter(moves::id.eq_any(raw))
            .select(MoveRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_move).collect()
    }

    async fn find_species(
        &self,
        id: SpeciesId,
    ) -> Result<Option<Species>, ReferenceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = species::table
            .find(id.get())
            .select(SpeciesRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_species).transpose()
    }
}
