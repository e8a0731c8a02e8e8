//! Port abstraction for Pokémon persistence.
//!
//! Every lookup is keyed by owner, box and Pokémon id together so adapters
//! cannot accidentally serve another user's record.

use async_trait::async_trait;

use crate::domain::{BoxId, NewPokemon, Pokemon, PokemonId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by Pokémon repository adapters.
    pub enum PokemonRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "pokemon repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "pokemon repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PokemonRepository: Send + Sync {
    /// Insert the row and its move slots atomically.
    async fn insert(&self, pokemon: &NewPokemon) -> Result<Pokemon, PokemonRepositoryError>;

    /// Fetch a Pokémon owned by `owner` in `box_id`.
    async fn find_owned(
        &self,
        owner: &UserId,
        box_id: BoxId,
        pokemon_id: PokemonId,
    ) -> Result<Option<Pokemon>, PokemonRepositoryError>;

    /// Replace the stored fields and move slots atomically.
    ///
    /// Returns `None` when the record no longer exists for its owner and box.
    async fn update(&self, pokemon: &Pokemon) -> Result<Option<Pokemon>, PokemonRepositoryError>;

    /// Remove a Pokémon and its move slots; `false` when nothing matched.
    async fn delete_owned(
        &self,
        owner: &UserId,
        box_id: BoxId,
        pokemon_id: PokemonId,
    ) -> Result<bool, PokemonRepositoryError>;

    /// Every Pokémon in one of `owner`'s boxes, ordered by id.
    async fn list_in_box(
        &self,
        owner: &UserId,
        box_id: BoxId,
    ) -> Result<Vec<Pokemon>, PokemonRepositoryError>;
}
