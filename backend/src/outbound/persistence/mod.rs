//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories are thin: they translate between the internal row structs in
//! `models.rs` and validated domain values, and map every database failure
//! onto their port's error enum. Connections come from a `bb8` pool of
//! `diesel-async` connections.
//!
//! # Example
//!
//! ```no_run
//! use pokepc::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/pokepc")).await?;
//! let users = DieselUserRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_box_repository;
mod diesel_pokemon_repository;
mod diesel_reference_repository;
mod diesel_session_store;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_box_repository::DieselBoxRepository;
pub use diesel_pokemon_repository::DieselPokemonRepository;
pub use diesel_reference_repository::DieselReferenceRepository;
pub use diesel_session_store::DieselSessionStore;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
