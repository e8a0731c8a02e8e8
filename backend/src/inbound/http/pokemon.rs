//! Pokémon handlers mounted under the session-protected `/box` scope.
//!
//! ```text
//! GET    /box/{boxId}/pokemon
//! POST   /box/{boxId}/pokemon[/{pokemonId}]  {"pokemonId":1,"boxId":1,"level":2,...}
//! GET    /box/{boxId}/pokemon/{pokemonId}
//! PUT    /box/{boxId}/pokemon/{pokemonId}    {"level":3}
//! DELETE /box/{boxId}/pokemon/{pokemonId}
//! ```
//!
//! On this wire `pokemonId` in a body names the species, while the path
//! segment of the same name addresses a stored record.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{CreatePokemonRequest, DeletePokemonRequest, UpdatePokemonRequest};
use crate::domain::{
    Ability, BoxId, Error, Level, MoveId, MoveSet, Nature, Pokemon, PokemonId, PokemonPatch,
    SpeciesId, UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::{ApiMessage, ApiResponse};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::AuthenticatedUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    ErrorCode, FieldName, body_id, field_error, parse_path_id,
};

const BOX_ID: FieldName = FieldName::new("boxId");
const POKEMON_ID: FieldName = FieldName::new("pokemonId");
const USER_ID: FieldName = FieldName::new("userId");
const LEVEL: FieldName = FieldName::new("level");
const NATURE: FieldName = FieldName::new("nature");
const ABILITY: FieldName = FieldName::new("ability");
const MOVE_IDS: FieldName = FieldName::new("moveIds");

/// Pokémon as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PokemonDto {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = 1)]
    pub user_id: i32,
    #[schema(example = 1)]
    pub box_id: i32,
    /// Species identifier.
    #[schema(example = 1)]
    pub pokemon_id: i32,
    #[schema(example = 2, minimum = 1, maximum = 100)]
    pub level: u8,
    #[schema(example = "Bold")]
    pub nature: String,
    #[schema(example = "Overgrow")]
    pub ability: String,
    #[schema(example = json!([1, 5]))]
    pub move_ids: Vec<i32>,
}

impl From<Pokemon> for PokemonDto {
    fn from(value: Pokemon) -> Self {
        let Pokemon {
            id,
            user_id,
            box_id,
            traits,
        } = value;
        Self {
            id: id.into(),
            user_id: user_id.into(),
            box_id: box_id.into(),
            pokemon_id: traits.species_id.into(),
            level: traits.level.get(),
            nature: traits.nature.into(),
            ability: traits.ability.into(),
            move_ids: Vec::<MoveId>::from(traits.moves)
                .into_iter()
                .map(i32::from)
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PokemonPayload {
    pub pokemon: PokemonDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PokemonListPayload {
    pub pokemon: Vec<PokemonDto>,
}

/// Body of the create routes.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePokemonBody {
    /// Species identifier.
    #[schema(example = 1)]
    pub pokemon_id: i64,
    /// Target box; takes precedence over the path.
    #[schema(example = 1)]
    pub box_id: i64,
    #[schema(example = 2)]
    pub level: i64,
    #[schema(example = "nature")]
    pub nature: String,
    #[schema(example = "ability")]
    pub ability: String,
    /// Must equal the session user when present.
    #[serde(default)]
    pub user_id: Option<i64>,
    /// Omit to receive the first reference moves; `[]` for none.
    #[serde(default)]
    pub move_ids: Option<Vec<i64>>,
}

/// Body of `PUT`; absent fields keep their stored value.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePokemonBody {
    #[serde(default)]
    pub pokemon_id: Option<i64>,
    #[serde(default)]
    #[schema(example = 3)]
    pub level: Option<i64>,
    #[serde(default)]
    pub nature: Option<String>,
    #[serde(default)]
    pub ability: Option<String>,
    #[serde(default)]
    pub move_ids: Option<Vec<i64>>,
}

fn parse_level(raw: i64) -> Result<Level, Error> {
    Level::new(raw).map_err(|err| field_error(LEVEL, ErrorCode::InvalidValue, err))
}

fn parse_nature(raw: &str) -> Result<Nature, Error> {
    Nature::new(raw).map_err(|err| field_error(NATURE, ErrorCode::InvalidValue, err))
}

fn parse_ability(raw: &str) -> Result<Ability, Error> {
    Ability::new(raw).map_err(|err| field_error(ABILITY, ErrorCode::InvalidValue, err))
}

fn parse_moves(raw: Vec<i64>) -> Result<MoveSet, Error> {
    let ids = raw
        .into_iter()
        .map(|id| body_id::<MoveId>(MOVE_IDS, id))
        .collect::<Result<Vec<_>, _>>()?;
    MoveSet::new(ids).map_err(|err| field_error(MOVE_IDS, ErrorCode::InvalidValue, err))
}

impl CreatePokemonBody {
    fn into_request(self, user_id: UserId) -> Result<CreatePokemonRequest, Error> {
        let session_user = i64::from(i32::from(user_id));
        if self.user_id.is_some_and(|claimed| claimed != session_user) {
            return Err(field_error(
                USER_ID,
                ErrorCode::UserMismatch,
                "userId does not match the logged in user",
            ));
        }
        Ok(CreatePokemonRequest {
            user_id,
            box_id: body_id::<BoxId>(BOX_ID, self.box_id)?,
            species_id: body_id::<SpeciesId>(POKEMON_ID, self.pokemon_id)?,
            level: parse_level(self.level)?,
            nature: parse_nature(&self.nature)?,
            ability: parse_ability(&self.ability)?,
            moves: self.move_ids.map(parse_moves).transpose()?,
        })
    }
}

impl TryFrom<UpdatePokemonBody> for PokemonPatch {
    type Error = Error;

    fn try_from(value: UpdatePokemonBody) -> Result<Self, Self::Error> {
        Ok(Self {
            species_id: value
                .pokemon_id
                .map(|raw| body_id::<SpeciesId>(POKEMON_ID, raw))
                .transpose()?,
            level: value.level.map(parse_level).transpose()?,
            nature: value.nature.as_deref().map(parse_nature).transpose()?,
            ability: value.ability.as_deref().map(parse_ability).transpose()?,
            moves: value.move_ids.map(parse_moves).transpose()?,
        })
    }
}

fn parse_target(path: &(String, String)) -> Result<(BoxId, PokemonId), Error> {
    let (box_id, pokemon_id) = path;
    Ok((
        parse_path_id(BOX_ID, box_id)?,
        parse_path_id(POKEMON_ID, pokemon_id)?,
    ))
}

/// List the Pokémon stored in one of the caller's boxes.
#[utoipa::path(
    get,
    path = "/box/{boxId}/pokemon",
    params(("boxId" = i32, Path, description = "Box identifier")),
    responses(
        (status = 200, description = "Pokémon in the box", body = ApiResponse<PokemonListPayload>),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 404, description = "Box not found", body = ErrorSchema)
    ),
    tags = ["pokemon"],
    operation_id = "listPokemon"
)]
#[get("/{box_id}/pokemon")]
pub async fn list_pokemon(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<ApiResponse<PokemonListPayload>>> {
    let box_id: BoxId = parse_path_id(BOX_ID, &path)?;
    let pokemon = state
        .pokemon_query
        .list_box(user.user_id(), box_id)
        .await?;
    Ok(web::Json(ApiResponse::new(
        format!("Retrieved Pokémon for box {box_id}"),
        PokemonListPayload {
            pokemon: pokemon.into_iter().map(PokemonDto::from).collect(),
        },
    )))
}

async fn create(
    state: &HttpState,
    user: AuthenticatedUser,
    body: CreatePokemonBody,
) -> ApiResult<HttpResponse> {
    let request = body.into_request(user.user_id())?;
    let created = state.pokemon.create(request).await?;
    Ok(HttpResponse::Created().json(ApiResponse::new(
        "Pokemon Created!",
        PokemonPayload {
            pokemon: created.into(),
        },
    )))
}

/// Place a new Pokémon in the box named by the body's `boxId`.
#[utoipa::path(
    post,
    path = "/box/{boxId}/pokemon",
    params(("boxId" = String, Path, description = "Ignored; the body selects the box")),
    request_body = CreatePokemonBody,
    responses(
        (status = 201, description = "Pokémon created", body = ApiResponse<PokemonPayload>),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 404, description = "Box not found", body = ErrorSchema)
    ),
    tags = ["pokemon"],
    operation_id = "createPokemon"
)]
#[post("/{box_id}/pokemon")]
pub async fn create_pokemon(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<CreatePokemonBody>,
) -> ApiResult<HttpResponse> {
    create(&state, user, payload.into_inner()).await
}

/// Legacy create route; both path segments are ignored.
#[utoipa::path(
    post,
    path = "/box/{boxId}/pokemon/{pokemonId}",
    params(
        ("boxId" = String, Path, description = "Ignored; the body selects the box"),
        ("pokemonId" = String, Path, description = "Ignored")
    ),
    request_body = CreatePokemonBody,
    responses(
        (status = 201, description = "Pokémon created", body = ApiResponse<PokemonPayload>),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 404, description = "Box not found", body = ErrorSchema)
    ),
    tags = ["pokemon"],
    operation_id = "createPokemonLegacy"
)]
#[post("/{box_id}/pokemon/{pokemon_id}")]
pub async fn create_pokemon_at(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<CreatePokemonBody>,
) -> ApiResult<HttpResponse> {
    create(&state, user, payload.into_inner()).await
}

/// Fetch one Pokémon.
#[utoipa::path(
    get,
    path = "/box/{boxId}/pokemon/{pokemonId}",
    params(
        ("boxId" = i32, Path, description = "Box identifier"),
        ("pokemonId" = i32, Path, description = "Pokémon identifier")
    ),
    responses(
        (status = 200, description = "Pokémon", body = ApiResponse<PokemonPayload>),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 404, description = "Pokemon not found", body = ErrorSchema)
    ),
    tags = ["pokemon"],
    operation_id = "getPokemon"
)]
#[get("/{box_id}/pokemon/{pokemon_id}")]
pub async fn get_pokemon(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<ApiResponse<PokemonPayload>>> {
    let (box_id, pokemon_id) = parse_target(&path)?;
    let pokemon = state
        .pokemon_query
        .get(user.user_id(), box_id, pokemon_id)
        .await?;
    Ok(web::Json(ApiResponse::new(
        format!("Retrieved Pokémon details for box {box_id}, Pokémon {pokemon_id}"),
        PokemonPayload {
            pokemon: pokemon.into(),
        },
    )))
}

/// Change some fields of a Pokémon.
#[utoipa::path(
    put,
    path = "/box/{boxId}/pokemon/{pokemonId}",
    params(
        ("boxId" = i32, Path, description = "Box identifier"),
        ("pokemonId" = i32, Path, description = "Pokémon identifier")
    ),
    request_body = UpdatePokemonBody,
    responses(
        (status = 200, description = "Pokémon updated", body = ApiResponse<PokemonPayload>),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 404, description = "Pokemon not found", body = ErrorSchema)
    ),
    tags = ["pokemon"],
    operation_id = "updatePokemon"
)]
#[put("/{box_id}/pokemon/{pokemon_id}")]
pub async fn update_pokemon(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<(String, String)>,
    payload: web::Json<UpdatePokemonBody>,
) -> ApiResult<web::Json<ApiResponse<PokemonPayload>>> {
    let (box_id, pokemon_id) = parse_target(&path)?;
    let patch = PokemonPatch::try_from(payload.into_inner())?;
    let updated = state
        .pokemon
        .update(UpdatePokemonRequest {
            user_id: user.user_id(),
            box_id,
            pokemon_id,
            patch,
        })
        .await?;
    Ok(web::Json(ApiResponse::new(
        "Pokemon Updated!",
        PokemonPayload {
            pokemon: updated.into(),
        },
    )))
}

/// Remove a Pokémon and its move slots.
#[utoipa::path(
    delete,
    path = "/box/{boxId}/pokemon/{pokemonId}",
    params(
        ("boxId" = i32, Path, description = "Box identifier"),
        ("pokemonId" = i32, Path, description = "Pokémon identifier")
    ),
    responses(
        (status = 200, description = "Pokémon deleted", body = ApiMessage),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 404, description = "Pokemon not found", body = ErrorSchema)
    ),
    tags = ["pokemon"],
    operation_id = "deletePokemon"
)]
#[delete("/{box_id}/pokemon/{pokemon_id}")]
pub async fn delete_pokemon(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<ApiMessage>> {
    let (box_id, pokemon_id) = parse_target(&path)?;
    state
        .pokemon
        .delete(DeletePokemonRequest {
            user_id: user.user_id(),
            box_id,
            pokemon_id,
        })
        .await?;
    Ok(web::Json(ApiMessage::new("Pokemon Deleted!")))
}

#[cfg(test)]
#[path = "pokemon_tests.rs"]
mod tests;
