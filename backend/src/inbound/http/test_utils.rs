//! Test helpers for inbound HTTP components.

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test as actix_test, web};
use serde_json::json;

use crate::inbound::http::health::HealthState;
use crate::inbound::http::session::{SESSION_COOKIE_NAME, SessionCookieConfig};
use crate::inbound::http::state::HttpState;
use crate::server::{AppDependencies, ServiceSettings, build_app, build_memory_ports};

/// Lowest bcrypt cost; keeps hashing fast in tests.
pub const TEST_BCRYPT_COST: u32 = 4;

/// HTTP state backed by fresh in-memory adapters, with insecure cookies so
/// plain-HTTP test requests send them back.
pub fn memory_state() -> web::Data<HttpState> {
    let ports = build_memory_ports(ServiceSettings {
        bcrypt_cost: TEST_BCRYPT_COST,
        ..ServiceSettings::default()
    })
    .expect("memory ports");
    web::Data::new(HttpState::new(ports, SessionCookieConfig { secure: false }))
}

/// Initialise the full application over [`memory_state`].
pub async fn init_memory_app()
-> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error> {
    actix_test::init_service(build_app(AppDependencies {
        health_state: web::Data::new(HealthState::new()),
        http_state: memory_state(),
    }))
    .await
}

/// Register `email` (tolerating an existing account) and return the session
/// cookie issued by `POST /login`.
pub async fn register_and_login<S, B>(app: &S, email: &str, password: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let credentials = json!({ "email": email, "password": password });
    let registered = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/users")
            .set_json(&credentials)
            .to_request(),
    )
    .await;
    assert!(
        matches!(registered.status(), StatusCode::CREATED | StatusCode::CONFLICT),
        "unexpected registration status {}",
        registered.status()
    );

    let logged_in = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/login")
            .set_json(&credentials)
            .to_request(),
    )
    .await;
    assert_eq!(logged_in.status(), StatusCode::OK);
    logged_in
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(Cookie::into_owned)
        .expect("session cookie")
}
