//! Driving port for Pokémon reads.
use async_trait::async_trait;

use crate::domain::{BoxId, Error, Pokemon, PokemonId, UserId};

#[async_trait]
pub trait PokemonQuery: Send + Sync {
    /// Fetch one Pokémon from one of the caller's boxes.
    async fn get(
        &self,
        user_id: UserId,
        box_id: BoxId,
        pokemon_id: PokemonId,
    ) -> Result<Pokemon, Error>;

    /// List the contents of one of the caller's boxes.
    async fn list_box(&self, user_id: UserId, box_id: BoxId) -> Result<Vec<Pokemon>, Error>;
}
