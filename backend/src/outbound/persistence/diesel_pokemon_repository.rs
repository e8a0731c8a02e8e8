//! PostgreSQL-backed `PokemonRepository` implementation using Diesel ORM.
//!
//! A Pokémon spans one `box_species` row and up to four `pokemon_moves`
//! rows. Every mutation touches both tables inside one transaction.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{PokemonRepository, PokemonRepositoryError};
use crate::domain::{
    Ability, BoxId, Level, MoveId, MoveSet, Nature, NewPokemon, Pokemon, PokemonId,
    PokemonTraits, SpeciesId, UserId,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewPokemonRow, PokemonMoveRow, PokemonRow, PokemonUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::{box_species, pokemon_moves};

type DieselResult<T> = Result<T, diesel::result::Error>;

/// Diesel-backed implementation of the Pokémon repository port.
#[derive(Clone)]
pub struct DieselPokemonRepository {
    pool: DbPool,
}

impl DieselPokemonRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PokemonRepositoryError {
    map_basic_pool_error(error, PokemonRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> PokemonRepositoryError {
    map_basic_diesel_error(
        error,
        PokemonRepositoryError::query,
        PokemonRepositoryError::connection,
    )
}

fn slot_rows(pokemon_id: i32, moves: &MoveSet) -> Vec<PokemonMoveRow> {
    moves
        .ids()
        .iter()
        .zip(0_i32..)
        .map(|(move_id, slot)| PokemonMoveRow {
            pokemon_id,
            slot,
            move_id: move_id.get(),
        })
        .collect()
}

/// Rebuild a domain record from its row and move slots sorted by slot.
fn rows_to_pokemon(
    row: PokemonRow,
    slots: Vec<PokemonMoveRow>,
) -> Result<Pokemon, PokemonRepositoryError> {
    fn corrupt(column: &str, err: impl std::fmt::Display) -> PokemonRepositoryError {
        PokemonRepositoryError::query(format!("invalid {column} in database: {err}"))
    }

    let PokemonRow {
        id,
        user_id,
        box_id,
        species_id,
        level,
        nature,
        ability,
    } = row;

    let move_ids = slots
        .into_iter()
        .map(|slot| MoveId::new(i64::from(slot.move_id)))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| corrupt("move_id", err))?;

    Ok(Pokemon {
        id: PokemonId::new(i64::from(id)).map_err(|err| corrupt("id", err))?,
        user_id: UserId::new(i64::from(user_id)).map_err(|err| corrupt("user_id", err))?,
        box_id: BoxId::new(i64::from(box_id)).map_err(|err| corrupt("box_id", err))?,
        traits: PokemonTraits {
            species_id: SpeciesId::new(i64::from(species_id))
                .map_err(|err| corrupt("species_id", err))?,
            level: Level::new(i64::from(level)).map_err(|err| corrupt("level", err))?,
            nature: Nature::new(nature).map_err(|err| corrupt("nature", err))?,
            ability: Ability::new(ability).map_err(|err| corrupt("ability", err))?,
            moves: MoveSet::new(move_ids).map_err(|err| corrupt("pokemon_moves", err))?,
        },
    })
}

async fn load_slots(conn: &mut AsyncPgConnection, ids: &[i32]) -> DieselResult<Vec<PokemonMoveRow>> {
    pokemon_moves::table
        .filter(pokemon_moves::pokemon_id.eq_any(ids))
        .order((pokemon_moves::pokemon_id.asc(), pokemon_moves::slot.asc()))
        .select(PokemonMoveRow::as_select())
        .load(conn)
        .await
}

async fn replace_slots(
    conn: &mut AsyncPgConnection,
    pokemon_id: i32,
    moves: &MoveSet,
) -> DieselResult<()> {
    diesel::delete(pokemon_moves::table.filter(pokemon_moves::pokemon_id.eq(pokemon_id)))
        .execute(conn)
        .await?;
    let rows = slot_rows(pokemon_id, moves);
    if !rows.is_empty() {
        diesel::insert_into(pokemon_moves::table)
            .values(&rows)
            .execute(conn)
            .await?;
    }
    Ok(())
}

#[async_trait]
impl PokemonRepository for DieselPokemonRepository {
    async fn insert(&self, pokemon: &NewPokemon) -> Result<Pokemon, PokemonRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let traits = &pokemon.traits;
        let new_row = NewPokemonRow {
            user_id: pokemon.user_id.get(),
            box_id: pokemon.box_id.get(),
            species_id: traits.species_id.get(),
            level: i32::from(traits.level.get()),
            nature: traits.nature.as_ref(),
            ability: traits.ability.as_ref(),
        };

        let (row, slots) = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    let row: PokemonRow = diesel::insert_into(box_species::table)
                        .values(&new_row)
                        .returning(PokemonRow::as_returning())
                        .get_result(conn)
                        .await?;
                    let slots = slot_rows(row.id, &traits.moves);
                    if !slots.is_empty() {
                        diesel::insert_into(pokemon_moves::table)
                            .values(&slots)
                            .execute(conn)
                            .await?;
                    }
                    Ok((row, slots))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        rows_to_pokemon(row, slots)
    }

    async fn find_owned(
        &self,
        owner: &UserId,
        box_id: BoxId,
        pokemon_id: PokemonId,
    ) -> Result<Option<Pokemon>, PokemonRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = box_species::table
            .filter(box_species::id.eq(pokemon_id.get()))
            .filter(box_species::user_id.eq(owner.get()))
            .filter(box_species::box_id.eq(box_id.get()))
            .select(PokemonRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        let Some(row) = row else {
            return Ok(None);
        };
        let slots = load_slots(&mut conn, &[row.id])
            .await
            .map_err(map_diesel_error)?;
        rows_to_pokemon(row, slots).map(Some)
    }

    async fn update(&self, pokemon: &Pokemon) -> Result<Option<Pokemon>, PokemonRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let traits = &pokemon.traits;
        let changes = PokemonUpdate {
            species_id: traits.species_id.get(),
            level: i32::from(traits.level.get()),
            nature: traits.nature.as_ref(),
            ability: traits.ability.as_ref(),
        };
        let (id, user_id, box_id) = (pokemon.id.get(), pokemon.user_id.get(), pokemon.box_id.get());

        let updated = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    let row: Option<PokemonRow> = diesel::update(
                        box_species::table
                            .filter(box_species::id.eq(id))
                            .filter(box_species::user_id.eq(user_id))
                            .filter(box_species::box_id.eq(box_id)),
                    )
                    .set(&changes)
                    .returning(PokemonRow::as_returning())
                    .get_result(conn)
                    .await
                    .optional()?;

                    let Some(row) = row else {
                        return Ok(None);
                    };
                    replace_slots(conn, row.id, &traits.moves).await?;
                    let slots = load_slots(conn, &[row.id]).await?;
                    Ok(Some((row, slots)))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        updated
            .map(|(row, slots)| rows_to_pokemon(row, slots))
            .transpose()
    }

    async fn delete_owned(
        &self,
        owner: &UserId,
        box_id: BoxId,
        pokemon_id: PokemonId,
    ) -> Result<bool, PokemonRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let (id, user_id, box_id) = (pokemon_id.get(), owner.get(), box_id.get());

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                let owned = box_species::table
                    .filter(box_species::id.eq(id))
                    .filter(box_species::user_id.eq(user_id))
                    .filter(box_species::box_id.eq(box_id))
                    .select(box_species::id)
                    .first::<i32>(conn)
                    .await
                    .optional()?;
                if owned.is_none() {
                    return Ok(false);
                }

                diesel::delete(pokemon_moves::table.filter(pokemon_moves::pokemon_id.eq(id)))
                    .execute(conn)
                    .await?;
                let removed = diesel::delete(box_species::table.find(id))
                    .execute(conn)
                    .await?;
                Ok(removed > 0)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn list_in_box(
        &self,
        owner: &UserId,
        box_id: BoxId,
    ) -> Result<Vec<Pokemon>, PokemonRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = box_species::table
            .filter(box_species::user_id.eq(owner.get()))
            .filter(box_species::box_id.eq(box_id.get()))
            .order(box_species::id.asc())
            .select(PokemonRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = rows.iter().map(|row| row.id).collect();
        let mut slots_by_pokemon: HashMap<i32, Vec<PokemonMoveRow>> = HashMap::new();
        for slot in load_slots(&mut conn, &ids)
            .await
            .map_err(map_diesel_error)?
        {
            slots_by_pokemon.entry(slot.pokemon_id).or_default().push(slot);
        }

        rows.into_iter()
            .map(|row| {
                let slots = slots_by_pokemon.remove(&row.id).unwrap_or_default();
                rows_to_pokemon(row, slots)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for row conversion.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn row() -> PokemonRow {
        PokemonRow {
            id: 1,
            user_id: 1,
            box_id: 1,
            species_id: 25,
            level: 2,
            nature: "nature".to_owned(),
            ability: "ability".to_owned(),
        }
    }

    fn move_set(raw: &[i64]) -> MoveSet {
        MoveSet::new(
            raw.iter()
                .map(|id| MoveId::new(*id).expect("move id"))
                .collect(),
        )
        .expect("move set")
    }

    #[rstest]
    fn slots_keep_move_order() {
        let rows = slot_rows(9, &move_set(&[33, 1, 45]));
        let summary: Vec<(i32, i32)> = rows.iter().map(|r| (r.slot, r.move_id)).collect();
        assert_eq!(summary, vec![(0, 33), (1, 1), (2, 45)]);
        assert!(rows.iter().all(|r| r.pokemon_id == 9));
    }

    #[rstest]
    fn rows_round_into_domain(row: PokemonRow) {
        let slots = slot_rows(1, &move_set(&[10, 22]));
        let pokemon = rows_to_pokemon(row, slots).expect("valid rows");
        assert_eq!(pokemon.traits.species_id.get(), 25);
        assert_eq!(pokemon.traits.level.get(), 2);
        assert_eq!(pokemon.traits.moves, move_set(&[10, 22]));
    }

    #[rstest]
    fn out_of_range_level_is_a_query_error(mut row: PokemonRow) {
        row.level = 101;
        let err = rows_to_pokemon(row, Vec::new()).expect_err("corrupt level");
        assert!(matches!(err, PokemonRepositoryError::Query { .. }));
    }
}
