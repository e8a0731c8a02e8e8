//! Pokémon use-cases scoped to the authenticated owner.
//!
//! Every operation resolves the target through the owner's id, so another
//! user's box or Pokémon is reported exactly like a missing one.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::box_service::map_box_repository_error;
use crate::domain::ports::{
    BoxRepository, CreatePokemonRequest, DeletePokemonRequest, PokemonCommand, PokemonQuery,
    PokemonRepository, PokemonRepositoryError, ReferenceRepository, UpdatePokemonRequest,
};
use crate::domain::reference_data_service::map_reference_repository_error;
use crate::domain::{
    BoxId, Error, MoveSet, NewPokemon, Pokemon, PokemonId, PokemonTraits, SpeciesId, UserId,
};

const BOX_NOT_FOUND: &str = "Box not found";
const POKEMON_NOT_FOUND: &str = "Pokemon not found";

/// Service implementing [`PokemonCommand`] and [`PokemonQuery`].
#[derive(Clone)]
pub struct PokemonService {
    pokemon: Arc<dyn PokemonRepository>,
    boxes: Arc<dyn BoxRepository>,
    reference: Arc<dyn ReferenceRepository>,
}

impl PokemonService {
    /// Create a new service over the given repositories.
    pub fn new(
        pokemon: Arc<dyn PokemonRepository>,
        boxes: Arc<dyn BoxRepository>,
        reference: Arc<dyn ReferenceRepository>,
    ) -> Self {
        Self {
            pokemon,
            boxes,
            reference,
        }
    }

    async fn ensure_box_owned(&self, user_id: UserId, box_id: BoxId) -> Result<(), Error> {
        self.boxes
            .find_owned(&user_id, box_id)
            .await
            .map_err(map_box_repository_error)?
            .map(|_| ())
            .ok_or_else(|| Error::not_found(BOX_NOT_FOUND))
    }

    async fn ensure_species_exists(&self, species_id: SpeciesId) -> Result<(), Error> {
        let found = self
            .reference
            .find_species(species_id)
            .await
            .map_err(map_reference_repository_error)?;
        if found.is_none() {
            return Err(
                Error::invalid_request(format!("unknown species {species_id}")).with_details(
                    json!({ "field": "pokemonId", "value": species_id.get(), "code": "unknown_species" }),
                ),
            );
        }
        Ok(())
    }

    async fn ensure_moves_exist(&self, moves: &MoveSet) -> Result<(), Error> {
        if moves.is_empty() {
            return Ok(());
        }
        let found: HashSet<_> = self
            .reference
            .find_moves(moves.ids())
            .await
            .map_err(map_reference_repository_error)?
            .into_iter()
            .map(|known| known.id)
            .collect();

        match moves.ids().iter().find(|id| !found.contains(id)) {
            Some(missing) => Err(
                Error::invalid_request(format!("unknown move {missing}")).with_details(
                    json!({ "field": "moveIds", "value": missing.get(), "code": "unknown_move" }),
                ),
            ),
            None => Ok(()),
        }
    }

    async fn default_moves(&self) -> Result<MoveSet, Error> {
        let moves = self
            .reference
            .list_moves()
            .await
            .map_err(map_reference_repository_error)?;
        Ok(MoveSet::first_slots(moves.into_iter().map(|known| known.id)))
    }

    async fn find_owned(
        &self,
        user_id: UserId,
        box_id: BoxId,
        pokemon_id: PokemonId,
    ) -> Result<Pokemon, Error> {
        self.pokemon
            .find_owned(&user_id, box_id, pokemon_id)
            .await
            .map_err(map_pokemon_repository_error)?
            .ok_or_else(|| Error::not_found(POKEMON_NOT_FOUND))
    }
}

fn map_pokemon_repository_error(error: PokemonRepositoryError) -> Error {
    match error {
        PokemonRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("pokemon repository unavailable: {message}"))
        }
        PokemonRepositoryError::Query { message } => {
            Error::internal(format!("pokemon repository error: {message}"))
        }
    }
}

#[async_trait]
impl PokemonCommand for PokemonService {
    async fn create(&self, request: CreatePokemonRequest) -> Result<Pokemon, Error> {
        let CreatePokemonRequest {
            user_id,
            box_id,
            species_id,
            level,
            nature,
            ability,
            moves,
        } = request;

        self.ensure_box_owned(user_id, box_id).await?;
        self.ensure_species_exists(species_id).await?;
        let moves = match moves {
            Some(moves) => {
                self.ensure_moves_exist(&moves).await?;
                moves
            }
            None => self.default_moves().await?,
        };

        let created = self
            .pokemon
            .insert(&NewPokemon {
                user_id,
                box_id,
                traits: PokemonTraits {
                    species_id,
                    level,
                    nature,
                    ability,
                    moves,
                },
            })
            .await
            .map_err(map_pokemon_repository_error)?;
        info!(%user_id, %box_id, pokemon_id = %created.id, "pokemon created");
        Ok(created)
    }

    async fn update(&self, request: UpdatePokemonRequest) -> Result<Pokemon, Error> {
        let UpdatePokemonRequest {
            user_id,
            box_id,
            pokemon_id,
            patch,
        } = request;

        let current = self.find_owned(user_id, box_id, pokemon_id).await?;
        if patch.is_empty() {
            return Ok(current);
        }
        if let Some(species_id) = patch.species_id {
            self.ensure_species_exists(species_id).await?;
        }
        if let Some(moves) = &patch.moves {
            self.ensure_moves_exist(moves).await?;
        }

        let updated = self
            .pokemon
            .update(&patch.apply(current))
            .await
            .map_err(map_pokemon_repository_error)?
            .ok_or_else(|| Error::not_found(POKEMON_NOT_FOUND))?;
        info!(%user_id, %box_id, %pokemon_id, "pokemon updated");
        Ok(updated)
    }

    async fn delete(&self, request: DeletePokemonRequest) -> Result<(), Error> {
        let DeletePokemonRequest {
            user_id,
            box_id,
            pokemon_id,
        } = request;

        let removed = self
            .pokemon
            .delete_owned(&user_id, box_id, pokemon_id)
            .await
            .map_err(map_pokemon_repository_error)?;
        if !removed {
            return Err(Error::not_found(POKEMON_NOT_FOUND));
        }
        info!(%user_id, %box_id, %pokemon_id, "pokemon deleted");
        Ok(())
    }
}

#[async_trait]
impl PokemonQuery for PokemonService {
    async fn get(
        &self,
        user_id: UserId,
        box_id: BoxId,
        pokemon_id: PokemonId,
    ) -> Result<Pokemon, Error> {
        self.find_owned(user_id, box_id, pokemon_id).await
    }

    async fn list_box(&self, user_id: UserId, box_id: BoxId) -> Result<Vec<Pokemon>, Error> {
        self.ensure_box_owned(user_id, box_id).await?;
        self.pokemon
            .list_in_box(&user_id, box_id)
            .await
            .map_err(map_pokemon_repository_error)
    }
}

#[cfg(test)]
#[path = "pokemon_service_tests.rs"]
mod tests;
