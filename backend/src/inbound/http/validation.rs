//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every rejection is an `invalid_request` error whose `details.field` names
//! the request field at fault, in the camelCase spelling clients send.

use std::fmt::Display;
use std::str::FromStr;

use serde_json::json;

use crate::domain::{Error, IdValidationError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidId,
    InvalidValue,
    UserMismatch,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidId => "invalid_id",
            ErrorCode::InvalidValue => "invalid_value",
            ErrorCode::UserMismatch => "user_mismatch",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(&self) -> &'static str {
        self.0
    }
}

/// Build an `invalid_request` error pointing at `field`.
pub(crate) fn field_error(field: FieldName, code: ErrorCode, message: impl Display) -> Error {
    Error::invalid_request(message.to_string()).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

/// Parse an identifier taken from the URL path.
pub(crate) fn parse_path_id<T>(field: FieldName, raw: &str) -> Result<T, Error>
where
    T: FromStr<Err = IdValidationError>,
{
    raw.parse::<T>().map_err(|err| {
        Error::invalid_request(format!("{} must be a positive integer", field.as_str()))
            .with_details(json!({
                "field": field.as_str(),
                "value": raw,
                "code": ErrorCode::InvalidId.as_str(),
                "reason": err.to_string(),
            }))
    })
}

/// Validate an identifier supplied in a JSON body.
pub(crate) fn body_id<T>(field: FieldName, raw: i64) -> Result<T, Error>
where
    T: TryFrom<i64, Error = IdValidationError>,
{
    T::try_from(raw).map_err(|_| {
        Error::invalid_request(format!("{} must be a positive integer", field.as_str()))
            .with_details(json!({
                "field": field.as_str(),
                "value": raw,
                "code": ErrorCode::InvalidId.as_str(),
            }))
    })
}
