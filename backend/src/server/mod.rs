//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{AppSettings, ConfigError, ServerConfig, SessionBackend};
pub use state_builders::{ServiceSettings, build_diesel_ports, build_memory_ports};

use actix_web::dev::{Server, Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::{NormalizePath, TrailingSlash};
use actix_web::{App, HttpMessage, HttpRequest, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::boxes::{create_box, list_boxes};
use crate::inbound::http::error::json_error_handler;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::home::homepage;
use crate::inbound::http::pokemon::{
    create_pokemon, create_pokemon_at, delete_pokemon, get_pokemon, list_pokemon, update_pokemon,
};
use crate::inbound::http::reference::{list_moves, list_species};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::{login, logout, register};
use crate::middleware::{RequireSession, Trace};

/// Shared state handed to every worker's [`App`].
#[derive(Clone)]
pub struct AppDependencies {
    pub health_state: web::Data<HealthState>,
    pub http_state: web::Data<HttpState>,
}

/// Request path as the client sent it, before trailing-slash normalisation.
struct ReceivedPath(String);

async fn invalid_route(req: HttpRequest) -> ApiResult<actix_web::HttpResponse> {
    let received = req
        .extensions()
        .get::<ReceivedPath>()
        .map(|received| received.0.clone());
    let path = received.unwrap_or_else(|| req.path().to_owned());
    Err(Error::not_found(format!(
        "Invalid route: {} {}",
        req.method(),
        path
    )))
}

/// Assemble the application: public routes, the session-gated `/box`
/// scope, health probes and the JSON 404 fallback.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let boxes = web::scope("/box")
        .wrap(RequireSession)
        .service(list_boxes)
        .service(create_box)
        .service(list_pokemon)
        .service(create_pokemon)
        .service(create_pokemon_at)
        .service(get_pokemon)
        .service(update_pokemon)
        .service(delete_pokemon);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(NormalizePath::new(TrailingSlash::Trim))
        .wrap(Trace)
        .wrap_fn(|req, srv| {
            let received = ReceivedPath(req.path().to_owned());
            req.extensions_mut().insert(received);
            srv.call(req)
        })
        .service(homepage)
        .service(register)
        .service(login)
        .service(logout)
        .service(list_moves)
        .service(list_species)
        .service(boxes)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app.default_service(web::to(invalid_route))
}

/// Construct an Actix HTTP server from a prepared [`ServerConfig`].
///
/// The caller decides when to mark `health_state` ready.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        cookie,
        ports,
    } = config;
    let http_state = web::Data::new(HttpState::new(ports, cookie));

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(bind_addr)?
    .run();
    Ok(server)
}
