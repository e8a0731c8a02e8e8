//! Read-only reference data: the move and species catalogues.

use actix_web::{get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Move, Species};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::ApiResponse;
use crate::inbound::http::schemas::{ErrorSchema, MoveSchema, SpeciesSchema};
use crate::inbound::http::state::HttpState;

#[derive(Debug, Serialize, ToSchema)]
pub struct MovesPayload {
    #[schema(value_type = Vec<MoveSchema>)]
    pub moves: Vec<Move>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SpeciesPayload {
    #[schema(value_type = Vec<SpeciesSchema>)]
    pub species: Vec<Species>,
}

/// List every known move ordered by id.
#[utoipa::path(
    get,
    path = "/moves",
    responses(
        (status = 200, description = "Moves", body = ApiResponse<MovesPayload>),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["reference"],
    operation_id = "listMoves",
    security([])
)]
#[get("/moves")]
pub async fn list_moves(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<ApiResponse<MovesPayload>>> {
    let moves = state.reference.moves().await?;
    Ok(web::Json(ApiResponse::new(
        "Retrieved moves",
        MovesPayload { moves },
    )))
}

/// List every known species ordered by id.
#[utoipa::path(
    get,
    path = "/species",
    responses(
        (status = 200, description = "Species", body = ApiResponse<SpeciesPayload>),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["reference"],
    operation_id = "listSpecies",
    security([])
)]
#[get("/species")]
pub async fn list_species(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<ApiResponse<SpeciesPayload>>> {
    let species = state.reference.species().await?;
    Ok(web::Json(ApiResponse::new(
        "Retrieved species",
        SpeciesPayload { species },
    )))
}
