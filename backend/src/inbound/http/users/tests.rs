//! Tests for account handlers.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

use crate::inbound::http::session::SESSION_COOKIE_NAME;
use crate::inbound::http::test_utils::{init_memory_app, register_and_login};

#[actix_web::test]
async fn register_returns_created_user() {
    let app = init_memory_app().await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/users")
            .set_json(json!({ "email": "User@Email.com ", "password": "password" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["message"], "User Created!");
    assert_eq!(body["payload"]["user"], json!({ "id": 1, "email": "user@email.com" }));
    assert!(body["payload"]["user"].get("password").is_none());
}

#[actix_web::test]
async fn duplicate_registration_conflicts() {
    let app = init_memory_app().await;
    let request = || {
        actix_test::TestRequest::post()
            .uri("/users")
            .set_json(json!({ "email": "user@email.com", "password": "password" }))
            .to_request()
    };
    let first = actix_test::call_service(&app, request()).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = actix_test::call_service(&app, request()).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let body: Value = actix_test::read_body_json(second).await;
    assert_eq!(body["message"], "Email already registered");
    assert_eq!(body["code"], "conflict");
}

#[rstest]
#[case("   ", "password", "email", "empty_email")]
#[case("no-at-sign", "password", "email", "invalid_email")]
#[case("user@email.com", "", "password", "empty_password")]
#[actix_web::test]
async fn invalid_credentials_name_the_field(
    #[case] email: &str,
    #[case] password: &str,
    #[case] field: &str,
    #[case] code: &str,
) {
    let app = init_memory_app().await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/login")
            .set_json(json!({ "email": email, "password": password }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["field"], field);
    assert_eq!(body["details"]["code"], code);
}

#[actix_web::test]
async fn login_sets_session_cookie() {
    let app = init_memory_app().await;
    let cookie = register_and_login(&app, "user@email.com", "password").await;
    assert_eq!(cookie.name(), SESSION_COOKIE_NAME);
    assert_eq!(cookie.value().len(), 64);
    assert_eq!(cookie.http_only(), Some(true));
}

#[rstest]
#[case("user@email.com", "wrong")]
#[case("nobody@email.com", "password")]
#[actix_web::test]
async fn bad_credentials_are_unauthorized(#[case] email: &str, #[case] password: &str) {
    let app = init_memory_app().await;
    register_and_login(&app, "user@email.com", "password").await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/login")
            .set_json(json!({ "email": email, "password": password }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(res.response().cookies().next().is_none());
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["message"], "Invalid credentials");
}

#[rstest]
#[case(actix_test::TestRequest::post())]
#[case(actix_test::TestRequest::get())]
#[actix_web::test]
async fn logout_without_session_still_succeeds(#[case] request: actix_test::TestRequest) {
    let app = init_memory_app().await;
    let res = actix_test::call_service(&app, request.uri("/logout").to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    let cleared = res
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .expect("removal cookie");
    assert_eq!(cleared.value(), "");
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body, json!({ "message": "Logged out!" }));
}
