//! Store-assigned integer identifiers.
//!
//! Every table keys its rows with a positive serial integer. Wrapping each
//! one in its own newtype keeps a box id from being passed where a Pokémon id
//! is expected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Validation errors raised when constructing an identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdValidationError {
    /// The value was zero or negative.
    #[error("{kind} must be a positive integer, got {value}")]
    NotPositive { kind: &'static str, value: i64 },
    /// The value could not be parsed as an integer.
    #[error("{kind} must be a positive integer, got {value:?}")]
    NotANumber { kind: &'static str, value: String },
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident => $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "i64", into = "i32")]
        pub struct $name(i32);

        impl $name {
            /// Validate and wrap a raw identifier.
            pub fn new(raw: i64) -> Result<Self, IdValidationError> {
                match i32::try_from(raw) {
                    Ok(value) if value > 0 => Ok(Self(value)),
                    _ => Err(IdValidationError::NotPositive { kind: $kind, value: raw }),
                }
            }

            /// Raw integer as stored in the database.
            #[must_use]
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl TryFrom<i64> for $name {
            type Error = IdValidationError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl FromStr for $name {
            type Err = IdValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = s.trim().parse::<i64>().map_err(|_| IdValidationError::NotANumber {
                    kind: $kind,
                    value: s.to_owned(),
                })?;
                Self::new(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id! {
    /// Identifier of a registered user.
    UserId => "user id"
}

define_id! {
    /// Identifier of a storage box.
    BoxId => "box id"
}

define_id! {
    /// Identifier of a stored Pokémon record.
    PokemonId => "pokemon id"
}

define_id! {
    /// Identifier of a species in the reference table.
    SpeciesId => "species id"
}

define_id! {
    /// Identifier of a move in the reference table.
    MoveId => "move id"
}
