//! End-to-end HTTP scenarios run against the in-memory adapters.

use actix_web::http::StatusCode;
use actix_web::test::TestRequest;
use actix_web::web;
use rstest::rstest;
use serde_json::{Value, json};

use pokepc::inbound::http::state::HttpState;

mod support;

use support::{http_state, init_app, login_as, send};

fn scenario_body() -> Value {
    json!({
        "pokemonId": 1,
        "userId": 1,
        "boxId": 1,
        "level": 2,
        "nature": "nature",
        "ability": "ability"
    })
}

#[rstest]
#[actix_web::test]
async fn create_update_delete_scenario(http_state: web::Data<HttpState>) {
    let app = init_app(http_state).await;
    let cookie = login_as(&app, "user@email.com").await;

    let (status, _, created) = send(
        &app,
        TestRequest::post()
            .uri("/box/:boxId/pokemon/:pokemonId/")
            .cookie(cookie.clone())
            .set_json(scenario_body())
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["message"], "Pokemon Created!");
    assert_eq!(created["payload"]["pokemon"]["level"], 2);
    assert_eq!(created["payload"]["pokemon"]["id"], 1);

    let (status, _, updated) = send(
        &app,
        TestRequest::put()
            .uri("/box/1/pokemon/1/")
            .cookie(cookie.clone())
            .set_json(json!({ "level": 3 }))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["payload"]["pokemon"]["level"], 3);
    for kept in ["nature", "ability", "moveIds", "pokemonId"] {
        assert_eq!(
            updated["payload"]["pokemon"][kept],
            created["payload"]["pokemon"][kept],
            "{kept} changed"
        );
    }

    let (status, _, deleted) = send(
        &app,
        TestRequest::delete()
            .uri("/box/1/pokemon/1/")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, json!({ "message": "Pokemon Deleted!" }));

    let (status, _, _) = send(
        &app,
        TestRequest::get()
            .uri("/box/1/pokemon/1/")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[rstest]
#[case(TestRequest::get().uri("/box"))]
#[case(TestRequest::post().uri("/box").set_json(json!({ "name": "Box 2" })))]
#[case(TestRequest::get().uri("/box/1/pokemon"))]
#[case(TestRequest::post().uri("/box/1/pokemon").set_json(scenario_body()))]
#[case(TestRequest::get().uri("/box/1/pokemon/1/"))]
#[case(TestRequest::put().uri("/box/1/pokemon/1").set_json(json!({ "level": 3 })))]
#[case(TestRequest::delete().uri("/box/1/pokemon/1"))]
#[case(TestRequest::get().uri("/box/not/a/route"))]
#[case(TestRequest::patch().uri("/box/1/pokemon/1"))]
#[actix_web::test]
async fn protected_routes_require_a_session(
    http_state: web::Data<HttpState>,
    #[case] request: TestRequest,
) {
    let app = init_app(http_state).await;
    let (status, _, body) = send(&app, request.to_request()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Unauthorized");
    assert!(body.get("payload").is_none());
}

#[rstest]
#[case("GET", "/foo", TestRequest::get().uri("/foo"))]
#[case("DELETE", "/users", TestRequest::delete().uri("/users"))]
#[case("GET", "/foo/", TestRequest::get().uri("/foo/"))]
#[actix_web::test]
async fn unknown_routes_are_not_found(
    http_state: web::Data<HttpState>,
    #[case] method: &str,
    #[case] path: &str,
    #[case] request: TestRequest,
) {
    let app = init_app(http_state).await;
    let (status, _, body) = send(&app, request.to_request()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], format!("Invalid route: {method} {path}"));
    assert!(body.get("payload").is_none());
}

#[rstest]
#[actix_web::test]
async fn homepage_has_a_payload(http_state: web::Data<HttpState>) {
    let app = init_app(http_state).await;
    let (status, _, body) = send(&app, TestRequest::get().uri("/").to_request()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Homepage!");
    assert!(body.get("payload").is_some());
}

#[rstest]
#[actix_web::test]
async fn logout_revokes_the_session(http_state: web::Data<HttpState>) {
    let app = init_app(http_state).await;
    let cookie = login_as(&app, "user@email.com").await;

    let (status, _, _) = send(
        &app,
        TestRequest::get()
            .uri("/box")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, cleared, body) = send(
        &app,
        TestRequest::post()
            .uri("/logout")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Logged out!" }));
    assert_eq!(cleared.map(|c| c.value().to_owned()), Some(String::new()));

    let (status, _, _) = send(
        &app,
        TestRequest::get().uri("/box").cookie(cookie).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[rstest]
#[actix_web::test]
async fn other_users_pokemon_are_not_found(http_state: web::Data<HttpState>) {
    let app = init_app(http_state).await;
    let owner = login_as(&app, "ash@pallet.town").await;
    let rival = login_as(&app, "gary@pallet.town").await;

    let (status, _, _) = send(
        &app,
        TestRequest::post()
            .uri("/box/1/pokemon")
            .cookie(owner)
            .set_json(json!({
                "pokemonId": 25,
                "boxId": 1,
                "level": 5,
                "nature": "Timid",
                "ability": "Static"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let requests = [
        TestRequest::get().uri("/box/1/pokemon/1"),
        TestRequest::put()
            .uri("/box/1/pokemon/1")
            .set_json(json!({ "level": 50 })),
        TestRequest::delete().uri("/box/1/pokemon/1"),
        TestRequest::get().uri("/box/1/pokemon"),
    ];
    for request in requests {
        let (status, _, body) = send(&app, request.cookie(rival.clone()).to_request()).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{body}");
    }

    // The rival's own default box is the second one created.
    let (status, _, body) = send(
        &app,
        TestRequest::post()
            .uri("/box/2/pokemon")
            .cookie(rival)
            .set_json(json!({
                "pokemonId": 133,
                "userId": 2,
                "boxId": 1,
                "level": 5,
                "nature": "Bold",
                "ability": "Adaptability"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Box not found");
}

#[rstest]
#[actix_web::test]
async fn duplicate_registration_conflicts(http_state: web::Data<HttpState>) {
    let app = init_app(http_state).await;
    login_as(&app, "user@email.com").await;

    let (status, _, body) = send(
        &app,
        TestRequest::post()
            .uri("/users")
            .set_json(json!({ "email": "USER@email.com", "password": "other" }))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Email already registered");
}

#[rstest]
#[case("/box/1/pokemon/")]
#[case("/box/1/pokemon")]
#[case("/box/")]
#[actix_web::test]
async fn trailing_slashes_are_normalised(http_state: web::Data<HttpState>, #[case] uri: &str) {
    let app = init_app(http_state).await;
    let cookie = login_as(&app, "user@email.com").await;
    let (status, _, _) = send(&app, TestRequest::get().uri(uri).cookie(cookie).to_request()).await;
    assert_eq!(status, StatusCode::OK);
}

#[rstest]
#[actix_web::test]
async fn every_response_carries_a_trace_id(http_state: web::Data<HttpState>) {
    let app = init_app(http_state).await;
    let res = actix_web::test::call_service(
        &app,
        TestRequest::get().uri("/box").to_request(),
    )
    .await;
    let header = res
        .headers()
        .get("trace-id")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace-id header");
    let body: Value = actix_web::test::read_body_json(res).await;
    assert_eq!(body["traceId"], header.as_str());
}
