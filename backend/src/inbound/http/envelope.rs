//! Success envelopes shared by every handler.
//!
//! Successful responses always carry a human-readable `message`; operations
//! that return data add it under `payload`.

use serde::Serialize;
use utoipa::ToSchema;

/// `{message, payload}` body for operations that return data.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Human-readable outcome.
    pub message: String,
    /// Operation result.
    pub payload: T,
}

impl<T> ApiResponse<T> {
    /// Wrap `payload` with `message`.
    pub fn new(message: impl Into<String>, payload: T) -> Self {
        Self {
            message: message.into(),
            payload,
        }
    }
}

/// `{message}` body for operations without a result.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApiMessage {
    /// Human-readable outcome.
    pub message: String,
}

impl ApiMessage {
    /// Build a message-only body.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
