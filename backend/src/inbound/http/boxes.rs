//! Box handlers mounted under the session-protected `/box` scope.
//!
//! ```text
//! GET  /box
//! POST /box {"name":"Box 2"}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{BoxName, PcBox};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::ApiResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::AuthenticatedUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{ErrorCode, FieldName, field_error};

const NAME: FieldName = FieldName::new("name");

/// Box as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BoxDto {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = 1)]
    pub user_id: i32,
    #[schema(example = "Box 1")]
    pub name: String,
}

impl From<PcBox> for BoxDto {
    fn from(value: PcBox) -> Self {
        Self {
            id: value.id.into(),
            user_id: value.user_id.into(),
            name: value.name.into(),
        }
    }
}

/// Body of `POST /box`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateBoxRequest {
    #[schema(example = "Box 2")]
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BoxesPayload {
    pub boxes: Vec<BoxDto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BoxPayload {
    #[serde(rename = "box")]
    pub pc_box: BoxDto,
}

/// List the caller's boxes ordered by id.
#[utoipa::path(
    get,
    path = "/box",
    responses(
        (status = 200, description = "Boxes", body = ApiResponse<BoxesPayload>),
        (status = 401, description = "Unauthorized", body = ErrorSchema)
    ),
    tags = ["boxes"],
    operation_id = "listBoxes"
)]
#[get("")]
pub async fn list_boxes(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<ApiResponse<BoxesPayload>>> {
    let boxes = state.boxes_query.list_boxes(user.user_id()).await?;
    Ok(web::Json(ApiResponse::new(
        "Retrieved boxes",
        BoxesPayload {
            boxes: boxes.into_iter().map(BoxDto::from).collect(),
        },
    )))
}

/// Create an additional box for the caller.
#[utoipa::path(
    post,
    path = "/box",
    request_body = CreateBoxRequest,
    responses(
        (status = 201, description = "Box created", body = ApiResponse<BoxPayload>),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema)
    ),
    tags = ["boxes"],
    operation_id = "createBox"
)]
#[post("")]
pub async fn create_box(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<CreateBoxRequest>,
) -> ApiResult<HttpResponse> {
    let name = BoxName::new(&payload.name)
        .map_err(|err| field_error(NAME, ErrorCode::InvalidValue, err))?;
    let created = state.boxes.create_box(user.user_id(), name).await?;
    Ok(HttpResponse::Created().json(ApiResponse::new(
        "Box Created!",
        BoxPayload {
            pc_box: created.into(),
        },
    )))
}
