//! Pokémon records stored in a user's boxes.
//!
//! Inbound adapters turn raw request fields into the value objects below, so
//! a [`Pokemon`] can only be built from data that already satisfies the
//! level, label and move-set rules.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{BoxId, MoveId, PokemonId, SpeciesId, UserId};

/// Lowest level a Pokémon may have.
pub const LEVEL_MIN: i64 = 1;
/// Highest level a Pokémon may have.
pub const LEVEL_MAX: i64 = 100;
/// Maximum length of a nature or ability label.
pub const LABEL_MAX: usize = 32;
/// Maximum number of move slots.
pub const MOVE_SLOTS: usize = 4;

/// Validation errors raised by the Pokémon value objects.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PokemonValidationError {
    #[error("level must be between {min} and {max}, got {value}")]
    LevelOutOfRange { min: i64, max: i64, value: i64 },
    #[error("{field} must not be empty")]
    EmptyLabel { field: &'static str },
    #[error("{field} must be at most {max} characters")]
    LabelTooLong { field: &'static str, max: usize },
    #[error("a Pokémon may know at most {max} moves, got {count}")]
    TooManyMoves { max: usize, count: usize },
    #[error("move {id} appears more than once")]
    DuplicateMove { id: MoveId },
}

/// Experience level in `1..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i32")]
pub struct Level(u8);

impl Level {
    /// Validate a raw level.
    pub fn new(raw: i64) -> Result<Self, PokemonValidationError> {
        if !(LEVEL_MIN..=LEVEL_MAX).contains(&raw) {
            return Err(PokemonValidationError::LevelOutOfRange {
                min: LEVEL_MIN,
                max: LEVEL_MAX,
                value: raw,
            });
        }
        u8::try_from(raw)
            .map(Self)
            .map_err(|_| PokemonValidationError::LevelOutOfRange {
                min: LEVEL_MIN,
                max: LEVEL_MAX,
                value: raw,
            })
    }

    /// Numeric level.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Level {
    type Error = PokemonValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Level> for i32 {
    fn from(value: Level) -> Self {
        i32::from(value.0)
    }
}

fn validate_label(field: &'static str, raw: &str) -> Result<String, PokemonValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PokemonValidationError::EmptyLabel { field });
    }
    if trimmed.chars().count() > LABEL_MAX {
        return Err(PokemonValidationError::LabelTooLong {
            field,
            max: LABEL_MAX,
        });
    }
    Ok(trimmed.to_owned())
}

macro_rules! define_label {
    ($(#[$meta:meta])* $name:ident => $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate a trimmed, non-empty label.
            pub fn new(raw: impl AsRef<str>) -> Result<Self, PokemonValidationError> {
                validate_label($field, raw.as_ref()).map(Self)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = PokemonValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

define_label! {
    /// Nature label, e.g. `"Adamant"`.
    Nature => "nature"
}

define_label! {
    /// Ability label, e.g. `"Overgrow"`.
    Ability => "ability"
}

/// Ordered move slots: at most [`MOVE_SLOTS`] distinct moves.
///
/// # Examples
/// ```
/// use pokepc::domain::{MoveId, MoveSet};
///
/// let ids = [1, 2].map(|raw| MoveId::new(raw).unwrap());
/// let moves = MoveSet::new(ids.to_vec()).unwrap();
/// assert_eq!(moves.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<MoveId>", into = "Vec<MoveId>")]
pub struct MoveSet(Vec<MoveId>);

impl MoveSet {
    /// Validate slot count and uniqueness, keeping the caller's order.
    pub fn new(ids: Vec<MoveId>) -> Result<Self, PokemonValidationError> {
        if ids.len() > MOVE_SLOTS {
            return Err(PokemonValidationError::TooManyMoves {
                max: MOVE_SLOTS,
                count: ids.len(),
            });
        }
        let mut seen = HashSet::with_capacity(ids.len());
        if let Some(id) = ids.iter().find(|id| !seen.insert(**id)) {
            return Err(PokemonValidationError::DuplicateMove { id: *id });
        }
        Ok(Self(ids))
    }

    /// Take the leading slots of a longer list, skipping repeats.
    pub fn first_slots(ids: impl IntoIterator<Item = MoveId>) -> Self {
        let mut slots: Vec<MoveId> = Vec::with_capacity(MOVE_SLOTS);
        for id in ids {
            if slots.len() == MOVE_SLOTS {
                break;
            }
            if !slots.contains(&id) {
                slots.push(id);
            }
        }
        Self(slots)
    }

    /// Move identifiers in slot order.
    pub fn ids(&self) -> &[MoveId] {
        &self.0
    }

    /// Number of filled slots.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no slot is filled.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<MoveId>> for MoveSet {
    type Error = PokemonValidationError;

    fn try_from(value: Vec<MoveId>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MoveSet> for Vec<MoveId> {
    fn from(value: MoveSet) -> Self {
        value.0
    }
}

/// Fields shared by stored and to-be-stored Pokémon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PokemonTraits {
    pub species_id: SpeciesId,
    pub level: Level,
    pub nature: Nature,
    pub ability: Ability,
    pub moves: MoveSet,
}

/// A Pokémon ready to be inserted into a box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPokemon {
    pub user_id: UserId,
    pub box_id: BoxId,
    pub traits: PokemonTraits,
}

/// A stored Pokémon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pokemon {
    pub id: PokemonId,
    pub user_id: UserId,
    pub box_id: BoxId,
    pub traits: PokemonTraits,
}

impl Pokemon {
    /// Attach a store-assigned id to a new record.
    pub fn from_new(id: PokemonId, new: NewPokemon) -> Self {
        let NewPokemon {
            user_id,
            box_id,
            traits,
        } = new;
        Self {
            id,
            user_id,
            box_id,
            traits,
        }
    }
}

/// Partial update: `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PokemonPatch {
    pub species_id: Option<SpeciesId>,
    pub level: Option<Level>,
    pub nature: Option<Nature>,
    pub ability: Option<Ability>,
    pub moves: Option<MoveSet>,
}

impl PokemonPatch {
    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.species_id.is_none()
            && self.level.is_none()
            && self.nature.is_none()
            && self.ability.is_none()
            && self.moves.is_none()
    }

    /// Apply the supplied fields over an existing record.
    #[must_use]
    pub fn apply(self, mut pokemon: Pokemon) -> Pokemon {
        let traits = &mut pokemon.traits;
        if let Some(species_id) = self.species_id {
            traits.species_id = species_id;
        }
        if let Some(level) = self.level {
            traits.level = level;
        }
        if let Some(nature) = self.nature {
            traits.nature = nature;
        }
        if let Some(ability) = self.ability {
            traits.ability = ability;
        }
        if let Some(moves) = self.moves {
            traits.moves = moves;
        }
        pokemon
    }
}

#[cfg(test)]
mod tests;
