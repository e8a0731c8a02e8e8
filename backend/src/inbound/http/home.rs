//! Public landing endpoint.

use actix_web::{HttpRequest, get, web};
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::ApiResponse;
use crate::inbound::http::session::request_token;
use crate::inbound::http::state::HttpState;

const TITLE: &str = "PokePC";

/// Homepage payload.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HomePayload {
    #[schema(example = "PokePC")]
    pub title: String,
    /// Whether the request carried a live session.
    pub is_logged_in: bool,
}

async fn is_logged_in(state: &HttpState, req: &HttpRequest) -> bool {
    let Some(token) = request_token(req) else {
        return false;
    };
    match state.sessions.resolve(&token).await {
        Ok(user) => user.is_some(),
        Err(error) => {
            warn!(code = ?error.code(), message = %error.message(), "session lookup failed on homepage");
            false
        }
    }
}

/// Landing page. Never requires a session.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Homepage", body = ApiResponse<HomePayload>)
    ),
    tags = ["home"],
    operation_id = "homepage",
    security([])
)]
#[get("/")]
pub async fn homepage(
    state: web::Data<HttpState>,
    req: HttpRequest,
) -> ApiResult<web::Json<ApiResponse<HomePayload>>> {
    let is_logged_in = is_logged_in(&state, &req).await;
    Ok(web::Json(ApiResponse::new(
        "Homepage!",
        HomePayload {
            title: TITLE.to_owned(),
            is_logged_in,
        },
    )))
}
