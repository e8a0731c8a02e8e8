//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP handler, the request/response DTOs and the
//! schema wrappers for domain types, plus the session cookie security
//! scheme. Swagger UI serves it at `/docs` in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::boxes::{BoxDto, BoxPayload, BoxesPayload, CreateBoxRequest};
use crate::inbound::http::envelope::ApiMessage;
use crate::inbound::http::home::HomePayload;
use crate::inbound::http::pokemon::{
    CreatePokemonBody, PokemonDto, PokemonListPayload, PokemonPayload, UpdatePokemonBody,
};
use crate::inbound::http::reference::{MovesPayload, SpeciesPayload};
use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, MoveSchema, SpeciesSchema, UserSchema,
};
use crate::inbound::http::users::{CredentialsRequest, UserPayload};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "PokePC API",
        description = "Session-authenticated storage of Pokémon in per-user boxes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::home::homepage,
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::reference::list_moves,
        crate::inbound::http::reference::list_species,
        crate::inbound::http::boxes::list_boxes,
        crate::inbound::http::boxes::create_box,
        crate::inbound::http::pokemon::list_pokemon,
        crate::inbound::http::pokemon::create_pokemon,
        crate::inbound::http::pokemon::create_pokemon_at,
        crate::inbound::http::pokemon::get_pokemon,
        crate::inbound::http::pokemon::update_pokemon,
        crate::inbound::http::pokemon::delete_pokemon,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        UserSchema,
        MoveSchema,
        SpeciesSchema,
        ApiMessage,
        HomePayload,
        CredentialsRequest,
        UserPayload,
        MovesPayload,
        SpeciesPayload,
        BoxDto,
        BoxesPayload,
        BoxPayload,
        CreateBoxRequest,
        PokemonDto,
        PokemonPayload,
        PokemonListPayload,
        CreatePokemonBody,
        UpdatePokemonBody,
    )),
    tags(
        (name = "home", description = "Landing page"),
        (name = "users", description = "Registration and session lifecycle"),
        (name = "reference", description = "Move and species catalogues"),
        (name = "boxes", description = "The caller's storage boxes"),
        (name = "pokemon", description = "Pokémon stored in the caller's boxes"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
