//! Storage boxes that group a user's Pokémon.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{BoxId, UserId};

/// Maximum allowed length for a box name.
pub const BOX_NAME_MAX: usize = 32;

/// Name given to the box created alongside every new account.
pub const DEFAULT_BOX_NAME: &str = "Box 1";

/// Validation errors returned by [`BoxName::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoxValidationError {
    #[error("box name must not be empty")]
    EmptyName,
    #[error("box name must be at most {max} characters")]
    NameTooLong { max: usize },
}

/// Human readable box label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BoxName(String);

impl BoxName {
    /// Validate a trimmed, non-empty name of at most [`BOX_NAME_MAX`] chars.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, BoxValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(BoxValidationError::EmptyName);
        }
        if trimmed.chars().count() > BOX_NAME_MAX {
            return Err(BoxValidationError::NameTooLong { max: BOX_NAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// The name given to a user's first box.
    pub fn default_box() -> Self {
        Self(DEFAULT_BOX_NAME.to_owned())
    }
}

impl AsRef<str> for BoxName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for BoxName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<BoxName> for String {
    fn from(value: BoxName) -> Self {
        value.0
    }
}

impl TryFrom<String> for BoxName {
    type Error = BoxValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A box owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcBox {
    pub id: BoxId,
    pub user_id: UserId,
    pub name: BoxName,
}
