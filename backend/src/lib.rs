//! PokePC backend: session-authenticated storage of Pokémon in per-user
//! boxes.
//!
//! The crate follows a hexagonal layout. [`domain`] holds entities, ports and
//! services; [`inbound`] exposes them over HTTP; [`outbound`] implements the
//! driven ports with PostgreSQL or in-process adapters; [`server`] wires the
//! pieces into an Actix application.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
