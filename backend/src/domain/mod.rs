//! Domain primitives, aggregates, ports and services.
//!
//! Purpose: define strongly typed entities used by the API and persistence
//! layers, the ports adapters plug into, and the services implementing the
//! use-cases. Nothing here depends on Actix or Diesel.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Identifiers: UserId, BoxId, PokemonId, SpeciesId, MoveId.
//! - Entities: User, PcBox, Pokemon, Move, Species.
//! - Services: UserAccountService, SessionManager, BoxService,
//!   PokemonService, ReferenceDataService.

pub mod auth;
pub mod box_service;
pub mod error;
pub mod ids;
pub mod pc_box;
pub mod pokemon;
pub mod pokemon_service;
pub mod ports;
pub mod reference;
pub mod reference_data_service;
pub mod session;
pub mod session_manager;
pub mod trace_id;
pub mod user;
pub mod user_accounts;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::box_service::BoxService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::ids::{BoxId, IdValidationError, MoveId, PokemonId, SpeciesId, UserId};
pub use self::pc_box::{BoxName, BoxValidationError, DEFAULT_BOX_NAME, PcBox};
pub use self::pokemon::{
    Ability, Level, MoveSet, Nature, NewPokemon, Pokemon, PokemonPatch, PokemonTraits,
    PokemonValidationError,
};
pub use self::pokemon_service::PokemonService;
pub use self::reference::{Move, Species};
pub use self::reference_data_service::ReferenceDataService;
pub use self::session::{
    IssuedSession, SessionDigest, SessionRecord, SessionToken, SessionTokenError,
};
pub use self::session_manager::SessionManager;
pub use self::trace_id::TraceId;
pub use self::user::{Email, NewUser, PasswordHash, StoredUser, User, UserValidationError};
pub use self::user_accounts::UserAccountService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use pokepc::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::not_found("Pokemon not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
