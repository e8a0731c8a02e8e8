//! Reference data served from the compiled-in seed rows.

use async_trait::async_trait;

use crate::domain::ports::{ReferenceRepository, ReferenceRepositoryError};
use crate::domain::{Move, MoveId, Species, SpeciesId};
use crate::outbound::reference_seed::{MOVES, SPECIES};

/// Immutable move and species tables, ordered by id.
#[derive(Debug, Clone)]
pub struct InMemoryReferenceRepository {
    moves: Vec<Move>,
    species: Vec<Species>,
}

impl InMemoryReferenceRepository {
    /// Build the repository from the shipped seed rows.
    ///
    /// Rows with an invalid id are a build-time mistake and are rejected.
    pub fn seeded() -> Result<Self, ReferenceRepositoryError> {
        let mut moves = MOVES
            .iter()
            .map(|&(id, name, move_type, power, accuracy, pp)| {
                Ok(Move {
                    id: MoveId::new(i64::from(id))
                        .map_err(|err| ReferenceRepositoryError::query(err.to_string()))?,
                    name: name.to_owned(),
                    move_type: move_type.to_owned(),
                    power,
                    accuracy,
                    pp,
                })
            })
            .collect::<Result<Vec<_>, ReferenceRepositoryError>>()?;
        moves.sort_by_key(|known| known.id);

        let mut species = SPECIES
            .iter()
            .map(|&(id, name)| {
                Ok(Species {
                    id: SpeciesId::new(i64::from(id))
                        .map_err(|err| ReferenceRepositoryError::query(err.to_string()))?,
                    name: name.to_owned(),
                })
            })
            .collect::<Result<Vec<_>, ReferenceRepositoryError>>()?;
        species.sort_by_key(|known| known.id);

        Ok(Self { moves, species })
    }
}

#[async_trait]
impl ReferenceRepository for InMemoryReferenceRepository {
    async fn list_moves(&self) -> Result<Vec<Move>, ReferenceRepositoryError> {
        Ok(self.moves.clone())
    }

    async fn list_species(&self) -> Result<Vec<Species>, ReferenceRepositoryError> {
        Ok(self.species.clone())
    }

    async fn find_moves(&self, ids: &[MoveId]) -> Result<Vec<Move>, ReferenceRepositoryError> {
        Ok(self
            .moves
            .iter()
            .filter(|known| ids.contains(&known.id))
            .cloned()
            .collect())
    }

    async fn find_species(
        &self,
        id: SpeciesId,
    ) -> Result<Option<Species>, ReferenceRepositoryError> {
        Ok(self.species.iter().find(|known| known.id == id).cloned())
    }
}
