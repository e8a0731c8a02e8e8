//! Account handlers: registration, login and logout.
//!
//! ```text
//! POST /users  {"email":"user@email.com","password":"password"}
//! POST /login  {"email":"user@email.com","password":"password"}
//! POST /logout
//! ```

use actix_web::{HttpRequest, HttpResponse, post, route, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{Error, LoginCredentials, LoginValidationError, User, UserValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::{ApiMessage, ApiResponse};
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::session::request_token;
use crate::inbound::http::state::HttpState;

/// Credentials body shared by `POST /users` and `POST /login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsRequest {
    /// Account email; trimmed and compared case-insensitively.
    #[schema(example = "user@email.com")]
    pub email: String,
    /// Plain-text password.
    #[schema(example = "password")]
    pub password: String,
}

impl TryFrom<CredentialsRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: CredentialsRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

/// `{user}` payload returned by registration and login.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserPayload {
    #[schema(value_type = UserSchema)]
    pub user: User,
}

fn map_credentials_error(err: LoginValidationError) -> Error {
    let code = match &err {
        LoginValidationError::EmptyPassword => "empty_password",
        LoginValidationError::Email(UserValidationError::EmptyEmail) => "empty_email",
        LoginValidationError::Email(UserValidationError::EmailTooLong { .. }) => "email_too_long",
        LoginValidationError::Email(_) => "invalid_email",
    };
    let field = match err {
        LoginValidationError::EmptyPassword => "password",
        LoginValidationError::Email(_) => "email",
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

/// Register a new account with a default box.
#[utoipa::path(
    post,
    path = "/users",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "User created", body = ApiResponse<UserPayload>),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "register",
    security([])
)]
#[post("/users")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_credentials_error)?;
    let user = state.registration.register(&credentials).await?;
    Ok(HttpResponse::Created().json(ApiResponse::new("User Created!", UserPayload { user })))
}

/// Authenticate and open a session.
#[utoipa::path(
    post,
    path = "/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Logged in", body = ApiResponse<UserPayload>,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_credentials_error)?;
    let user = state.login.authenticate(&credentials).await?;
    let session = state.sessions.start(user.id()).await?;
    info!(user_id = %user.id(), "user logged in");
    Ok(HttpResponse::Ok()
        .cookie(state.cookie.issue(&session))
        .json(ApiResponse::new("Logged in!", UserPayload { user })))
}

/// Revoke the current session, if any, and clear the cookie.
#[utoipa::path(
    post,
    path = "/logout",
    responses(
        (status = 200, description = "Logged out", body = ApiMessage)
    ),
    tags = ["users"],
    operation_id = "logout",
    security([])
)]
#[route("/logout", method = "GET", method = "POST")]
pub async fn logout(state: web::Data<HttpState>, req: HttpRequest) -> ApiResult<HttpResponse> {
    if let Some(token) = request_token(&req) {
        state.sessions.end(&token).await?;
    }
    Ok(HttpResponse::Ok()
        .cookie(state.cookie.clear())
        .json(ApiMessage::new("Logged out!")))
}

#[cfg(test)]
mod tests;
