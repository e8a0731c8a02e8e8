//! Login session primitives.
//!
//! A session token is 32 random bytes, hex encoded, handed to the client as a
//! cookie. Stores only ever see its SHA-256 [`SessionDigest`].

use std::fmt;

use chrono::{DateTime, Utc};
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::domain::UserId;

const TOKEN_BYTES: usize = 32;
const TOKEN_HEX_LEN: usize = TOKEN_BYTES * 2;

/// Errors raised when parsing a token presented by a client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionTokenError {
    #[error("session token must be {expected} hexadecimal characters")]
    Malformed { expected: usize },
}

/// Opaque bearer token identifying a session.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(Zeroizing<String>);

impl SessionToken {
    /// Generate a fresh token from the operating system RNG.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = Zeroizing::new([0_u8; TOKEN_BYTES]);
        OsRng.fill_bytes(&mut bytes[..]);
        Self(Zeroizing::new(hex::encode(&bytes[..])))
    }

    /// Parse a client-supplied token, rejecting anything of the wrong shape.
    pub fn parse(raw: &str) -> Result<Self, SessionTokenError> {
        let well_formed =
            raw.len() == TOKEN_HEX_LEN && raw.bytes().all(|byte| byte.is_ascii_hexdigit());
        if !well_formed {
            return Err(SessionTokenError::Malformed {
                expected: TOKEN_HEX_LEN,
            });
        }
        Ok(Self(Zeroizing::new(raw.to_ascii_lowercase())))
    }

    /// Token text for the cookie value.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Storage key derived from the token.
    #[must_use]
    pub fn digest(&self) -> SessionDigest {
        SessionDigest(hex::encode(Sha256::digest(self.0.as_bytes())))
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// Hex-encoded SHA-256 of a [`SessionToken`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionDigest(String);

impl SessionDigest {
    /// Rehydrate a digest read back from storage.
    pub fn from_stored(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Hex text of the digest.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// What a store keeps for each session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionRecord {
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Whether the session has lapsed at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// A newly opened session returned to the inbound adapter.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: SessionToken,
    pub expires_at: DateTime<Utc>,
}
