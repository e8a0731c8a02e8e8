//! Driving port for Pokémon mutations.
use async_trait::async_trait;

use crate::domain::{
    BoxId, Error, Level, Ability, MoveSet, Nature, Pokemon, PokemonId, PokemonPatch, SpeciesId,
    UserId,
};

/// Request to place a new Pokémon in one of the caller's boxes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePokemonRequest {
    pub user_id: UserId,
    pub box_id: BoxId,
    pub species_id: SpeciesId,
    pub level: Level,
    pub nature: Nature,
    pub ability: Ability,
    /// `None` assigns the first moves of the reference list.
    pub moves: Option<MoveSet>,
}

/// Request to change some fields of an existing Pokémon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePokemonRequest {
    pub user_id: UserId,
    pub box_id: BoxId,
    pub pokemon_id: PokemonId,
    pub patch: PokemonPatch,
}

/// Request to remove a Pokémon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeletePokemonRequest {
    pub user_id: UserId,
    pub box_id: BoxId,
    pub pokemon_id: PokemonId,
}

#[async_trait]
pub trait PokemonCommand: Send + Sync {
    /// Validate references and store a new Pokémon.
    async fn create(&self, request: CreatePokemonRequest) -> Result<Pokemon, Error>;

    /// Apply a partial update and return the stored result.
    async fn update(&self, request: UpdatePokemonRequest) -> Result<Pokemon, Error>;

    /// Remove a Pokémon owned by the caller.
    async fn delete(&self, request: DeletePokemonRequest) -> Result<(), Error>;
}
