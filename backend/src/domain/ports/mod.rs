//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Service`, `*Command`, `*Query`) are called by inbound
//! adapters. Driven ports (`*Repository`, [`SessionStore`],
//! [`PasswordHasher`]) are implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod box_command;
mod box_repository;
mod login_service;
mod password_hasher;
mod pokemon_command;
mod pokemon_query;
mod pokemon_repository;
mod reference_data_query;
mod reference_repository;
mod session_service;
mod session_store;
mod user_repository;

pub use box_command::{BoxCommand, BoxQuery};
#[cfg(test)]
pub use box_repository::MockBoxRepository;
pub use box_repository::{BoxRepository, BoxRepositoryError};
pub use login_service::{LoginService, RegistrationService};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
pub use pokemon_command::{
    CreatePokemonRequest, DeletePokemonRequest, PokemonCommand, UpdatePokemonRequest,
};
pub use pokemon_query::PokemonQuery;
#[cfg(test)]
pub use pokemon_repository::MockPokemonRepository;
pub use pokemon_repository::{PokemonRepository, PokemonRepositoryError};
pub use reference_data_query::ReferenceDataQuery;
#[cfg(test)]
pub use reference_repository::MockReferenceRepository;
pub use reference_repository::{ReferenceRepository, ReferenceRepositoryError};
pub use session_service::SessionService;
#[cfg(test)]
pub use session_store::MockSessionStore;
pub use session_store::{SessionStore, SessionStoreError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
