//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    BoxCommand, BoxQuery, LoginService, PokemonCommand, PokemonQuery, ReferenceDataQuery,
    RegistrationService, SessionService,
};
use crate::inbound::http::session::SessionCookieConfig;

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub sessions: Arc<dyn SessionService>,
    pub pokemon: Arc<dyn PokemonCommand>,
    pub pokemon_query: Arc<dyn PokemonQuery>,
    pub boxes: Arc<dyn BoxCommand>,
    pub boxes_query: Arc<dyn BoxQuery>,
    pub reference: Arc<dyn ReferenceDataQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub sessions: Arc<dyn SessionService>,
    pub pokemon: Arc<dyn PokemonCommand>,
    pub pokemon_query: Arc<dyn PokemonQuery>,
    pub boxes: Arc<dyn BoxCommand>,
    pub boxes_query: Arc<dyn BoxQuery>,
    pub reference: Arc<dyn ReferenceDataQuery>,
    pub cookie: SessionCookieConfig,
}

impl HttpState {
    /// Construct state from the ports bundle and cookie attributes.
    pub fn new(ports: HttpStatePorts, cookie: SessionCookieConfig) -> Self {
        let HttpStatePorts {
            login,
            registration,
            sessions,
            pokemon,
            pokemon_query,
            boxes,
            boxes_query,
            reference,
        } = ports;
        Self {
            login,
            registration,
            sessions,
            pokemon,
            pokemon_query,
            boxes,
            boxes_query,
            reference,
            cookie,
        }
    }
}
