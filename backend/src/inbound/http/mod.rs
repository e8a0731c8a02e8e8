//! HTTP inbound adapter exposing REST endpoints.

pub mod boxes;
pub mod envelope;
pub mod error;
pub mod health;
pub mod home;
pub mod pokemon;
pub mod reference;
pub mod schemas;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;
