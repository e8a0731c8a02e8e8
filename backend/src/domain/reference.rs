//! Read-only reference data: moves and species.
//!
//! Rows are seeded by migrations and shared by every user. The application
//! never mutates them.

use serde::{Deserialize, Serialize};

use crate::domain::{MoveId, SpeciesId};

/// A learnable move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Move {
    pub id: MoveId,
    pub name: String,
    pub move_type: String,
    pub power: Option<i32>,
    pub accuracy: Option<i32>,
    pub pp: i32,
}

/// A Pokémon species.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Species {
    pub id: SpeciesId,
    pub name: String,
}
