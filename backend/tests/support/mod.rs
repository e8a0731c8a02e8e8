//! Shared harness for HTTP scenario tests.

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test as actix_test, web};
use rstest::fixture;
use serde_json::{Value, json};

use pokepc::inbound::http::health::HealthState;
use pokepc::inbound::http::session::{SESSION_COOKIE_NAME, SessionCookieConfig};
use pokepc::inbound::http::state::HttpState;
use pokepc::server::{AppDependencies, ServiceSettings, build_app, build_memory_ports};

/// Fresh in-memory state; each test gets its own users and sessions.
#[fixture]
pub fn http_state() -> web::Data<HttpState> {
    let ports = build_memory_ports(ServiceSettings {
        bcrypt_cost: 4,
        ..ServiceSettings::default()
    })
    .expect("memory ports");
    web::Data::new(HttpState::new(ports, SessionCookieConfig { secure: false }))
}

pub async fn init_app(
    state: web::Data<HttpState>,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error> {
    actix_test::init_service(build_app(AppDependencies {
        health_state: web::Data::new(HealthState::new()),
        http_state: state,
    }))
    .await
}

/// Send `request` and return the status, session cookie (if set) and body.
pub async fn send<S, B>(app: &S, request: Request) -> (StatusCode, Option<Cookie<'static>>, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = actix_test::call_service(app, request).await;
    let status = res.status();
    let cookie = res
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(Cookie::into_owned);
    let bytes = actix_test::read_body(res).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON body")
    };
    (status, cookie, body)
}

/// Register and log in, returning the session cookie.
pub async fn login_as<S, B>(app: &S, email: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let credentials = json!({ "email": email, "password": "password" });
    let (status, _, _) = send(
        app,
        actix_test::TestRequest::post()
            .uri("/users")
            .set_json(&credentials)
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, cookie, _) = send(
        app,
        actix_test::TestRequest::post()
            .uri("/login")
            .set_json(&credentials)
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    cookie.expect("session cookie")
}
