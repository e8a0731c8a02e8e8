//! Builders wiring driven adapters and domain services into HTTP ports.

use std::sync::Arc;

use chrono::Duration;

use crate::domain::ports::{
    BoxRepository, PokemonRepository, ReferenceRepository, ReferenceRepositoryError, SessionStore,
    UserRepository,
};
use crate::domain::{
    BoxService, PokemonService, ReferenceDataService, SessionManager, UserAccountService,
};
use crate::inbound::http::state::HttpStatePorts;
use crate::outbound::memory::{InMemoryReferenceRepository, InMemorySessionStore, InMemoryStore};
use crate::outbound::password::{BcryptPasswordHasher, DEFAULT_BCRYPT_COST};
use crate::outbound::persistence::{
    DbPool, DieselBoxRepository, DieselPokemonRepository, DieselReferenceRepository,
    DieselSessionStore, DieselUserRepository,
};

use super::config::SessionBackend;

/// Tunables applied to the domain services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceSettings {
    pub bcrypt_cost: u32,
    pub session_ttl: Duration,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            session_ttl: Duration::hours(2),
        }
    }
}

/// Implementations of every driven port.
struct DrivenAdapters {
    users: Arc<dyn UserRepository>,
    boxes: Arc<dyn BoxRepository>,
    pokemon: Arc<dyn PokemonRepository>,
    reference: Arc<dyn ReferenceRepository>,
    sessions: Arc<dyn SessionStore>,
}

fn build_ports(adapters: DrivenAdapters, settings: ServiceSettings) -> HttpStatePorts {
    let DrivenAdapters {
        users,
        boxes,
        pokemon,
        reference,
        sessions,
    } = adapters;

    let hasher = Arc::new(BcryptPasswordHasher::new(settings.bcrypt_cost));
    let accounts = Arc::new(UserAccountService::new(users, hasher));
    let box_service = Arc::new(BoxService::new(Arc::clone(&boxes)));
    let pokemon_service = Arc::new(PokemonService::new(
        pokemon,
        boxes,
        Arc::clone(&reference),
    ));

    HttpStatePorts {
        login: accounts.clone(),
        registration: accounts,
        sessions: Arc::new(SessionManager::new(sessions, settings.session_ttl)),
        pokemon: pokemon_service.clone(),
        pokemon_query: pokemon_service,
        boxes: box_service.clone(),
        boxes_query: box_service,
        reference: Arc::new(ReferenceDataService::new(reference)),
    }
}

/// Wire every port to process-local adapters.
///
/// # Errors
/// Fails only if the bundled reference rows are invalid.
pub fn build_memory_ports(
    settings: ServiceSettings,
) -> Result<HttpStatePorts, ReferenceRepositoryError> {
    let store = InMemoryStore::new();
    Ok(build_ports(
        DrivenAdapters {
            users: Arc::new(store.clone()),
            boxes: Arc::new(store.clone()),
            pokemon: Arc::new(store),
            reference: Arc::new(InMemoryReferenceRepository::seeded()?),
            sessions: Arc::new(InMemorySessionStore::default()),
        },
        settings,
    ))
}

/// Wire every port to PostgreSQL, keeping sessions where `session_backend`
/// says.
pub fn build_diesel_ports(
    pool: &DbPool,
    session_backend: SessionBackend,
    settings: ServiceSettings,
) -> HttpStatePorts {
    let sessions: Arc<dyn SessionStore> = match session_backend {
        SessionBackend::Memory => Arc::new(InMemorySessionStore::default()),
        SessionBackend::Database => Arc::new(DieselSessionStore::new(pool.clone())),
    };
    build_ports(
        DrivenAdapters {
            users: Arc::new(DieselUserRepository::new(pool.clone())),
            boxes: Arc::new(DieselBoxRepository::new(pool.clone())),
            pokemon: Arc::new(DieselPokemonRepository::new(pool.clone())),
            reference: Arc::new(DieselReferenceRepository::new(pool.clone())),
            sessions,
        },
        settings,
    )
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{Email, LoginCredentials, UserId};

    fn fast_settings() -> ServiceSettings {
        ServiceSettings {
            bcrypt_cost: 4,
            ..ServiceSettings::default()
        }
    }

    #[tokio::test]
    async fn memory_ports_share_one_store() {
        let ports = build_memory_ports(fast_settings()).expect("ports");
        let credentials =
            LoginCredentials::try_from_parts("ash@pallet.town", "pikachu").expect("credentials");

        let user = ports.registration.register(&credentials).await.expect("registered");
        assert_eq!(user.email(), &Email::new("ash@pallet.town").expect("email"));

        let boxes = ports.boxes_query.list_boxes(user.id()).await.expect("boxes");
        assert_eq!(boxes.len(), 1);

        let logged_in = ports.login.authenticate(&credentials).await.expect("login");
        assert_eq!(logged_in.id(), user.id());
    }

    #[tokio::test]
    async fn memory_ports_issue_resolvable_sessions() {
        let ports = build_memory_ports(fast_settings()).expect("ports");
        let user_id = UserId::new(1).expect("user id");
        let issued = ports.sessions.start(user_id).await.expect("session");
        assert_eq!(
            ports.sessions.resolve(&issued.token).await.expect("resolve"),
            Some(user_id)
        );
    }

    #[tokio::test]
    async fn memory_reference_data_is_seeded() {
        let ports = build_memory_ports(fast_settings()).expect("ports");
        assert!(!ports.reference.moves().await.expect("moves").is_empty());
        assert!(!ports.reference.species().await.expect("species").is_empty());
    }
}
