//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer; repositories convert them
//! into validated domain values.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{box_species, boxes, moves, pokemon_moves, sessions, species, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = boxes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BoxRow {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = boxes)]
pub(crate) struct NewBoxRow<'a> {
    pub user_id: i32,
    pub name: &'a str,
}

/// Row struct for the `box_species` table, one per Pokémon.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = box_species)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PokemonRow {
    pub id: i32,
    pub user_id: i32,
    pub box_id: i32,
    pub species_id: i32,
    pub level: i32,
    pub nature: String,
    pub ability: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = box_species)]
pub(crate) struct NewPokemonRow<'a> {
    pub user_id: i32,
    pub box_id: i32,
    pub species_id: i32,
    pub level: i32,
    pub nature: &'a str,
    pub ability: &'a str,
}

/// Full replacement of the mutable columns; ownership columns never change.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = box_species)]
pub(crate) struct PokemonUpdate<'a> {
    pub species_id: i32,
    pub level: i32,
    pub nature: &'a str,
    pub ability: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = pokemon_moves)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PokemonMoveRow {
    pub pokemon_id: i32,
    pub slot: i32,
    pub move_id: i32,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = moves)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MoveRow {
    pub id: i32,
    pub name: String,
    pub move_type: String,
    pub power: Option<i32>,
    pub accuracy: Option<i32>,
    pub pp: i32,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = species)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SpeciesRow {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SessionRow {
    pub digest: String,
    pub user_id: i32,
    pub expires_at: DateTime<Utc>,
}
