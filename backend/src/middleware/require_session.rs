//! Session gate for protected scopes.
//!
//! The middleware resolves the `session` cookie before route matching, so a
//! protected scope answers 401 even for paths none of its routes match.
//! Resolved users reach handlers through the
//! [`AuthenticatedUser`](crate::inbound::http::session::AuthenticatedUser)
//! extractor.

use std::rc::Rc;
use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{HttpMessage, ResponseError, web};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::debug;

use crate::domain::{Error, UserId};
use crate::inbound::http::session::{AuthenticatedUser, UNAUTHORIZED_MESSAGE, request_token};
use crate::inbound::http::state::HttpState;

/// Reject requests lacking a live session with 401.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use pokepc::middleware::RequireSession;
///
/// let app = App::new().service(web::scope("/box").wrap(RequireSession));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct RequireSession;

impl<S, B> Transform<S, ServiceRequest> for RequireSession
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RequireSessionMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireSessionMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// Service wrapper produced by [`RequireSession`].
pub struct RequireSessionMiddleware<S> {
    service: Rc<S>,
}

async fn resolve_user(req: &ServiceRequest) -> Result<UserId, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .cloned()
        .ok_or_else(|| Error::internal("HTTP state is not registered"))?;
    let Some(token) = request_token(req.request()) else {
        debug!(path = %req.path(), "protected request without session cookie");
        return Err(Error::unauthorized(UNAUTHORIZED_MESSAGE));
    };
    match state.sessions.resolve(&token).await? {
        Some(user_id) => Ok(user_id),
        None => {
            debug!(path = %req.path(), "session token unknown or expired");
            Err(Error::unauthorized(UNAUTHORIZED_MESSAGE))
        }
    }
}

impl<S, B> Service<ServiceRequest> for RequireSessionMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        Box::pin(async move {
            match resolve_user(&req).await {
                Ok(user_id) => {
                    req.extensions_mut().insert(AuthenticatedUser(user_id));
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                }
                Err(error) => {
                    let response = error.error_response();
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test};
    use rstest::rstest;
    use serde_json::{Value, json};

    use crate::domain::SessionToken;
    use crate::inbound::http::session::SESSION_COOKIE_NAME;
    use crate::inbound::http::test_utils::memory_state;

    async fn whoami(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(user.user_id().to_string())
    }

    async fn call(state: web::Data<HttpState>, cookie: Option<Cookie<'static>>, uri: &str) -> (StatusCode, Vec<u8>) {
        let app = test::init_service(
            App::new().app_data(state).service(
                web::scope("/box")
                    .wrap(RequireSession)
                    .route("/me", web::get().to(whoami)),
            ),
        )
        .await;
        let mut request = test::TestRequest::get().uri(uri);
        if let Some(cookie) = cookie {
            request = request.cookie(cookie);
        }
        let res = test::call_service(&app, request.to_request()).await;
        let status = res.status();
        (status, test::read_body(res).await.to_vec())
    }

    #[rstest]
    #[case(None, "/box/me")]
    #[case(Some(Cookie::new(SESSION_COOKIE_NAME, "not-hex")), "/box/me")]
    #[case(Some(Cookie::new(SESSION_COOKIE_NAME, SessionToken::generate().as_str().to_owned())), "/box/me")]
    #[case(None, "/box/does/not/exist")]
    #[actix_web::test]
    async fn missing_or_unknown_sessions_are_rejected(
        #[case] cookie: Option<Cookie<'static>>,
        #[case] uri: &str,
    ) {
        let (status, body) = call(memory_state(), cookie, uri).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let body: Value = serde_json::from_slice(&body).expect("json body");
        assert_eq!(body["message"], "Unauthorized");
        assert_eq!(body["code"], "unauthorized");
        assert!(body.get("payload").is_none());
    }

    #[actix_web::test]
    async fn live_session_reaches_the_handler() {
        let state = memory_state();
        let user_id = UserId::new(7).expect("user id");
        let issued = state.sessions.start(user_id).await.expect("session");
        let cookie = state.cookie.issue(&issued);

        let (status, body) = call(state, Some(cookie), "/box/me").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"7");
    }

    #[actix_web::test]
    async fn revoked_session_is_rejected() {
        let state = memory_state();
        let issued = state
            .sessions
            .start(UserId::new(1).expect("user id"))
            .await
            .expect("session");
        state.sessions.end(&issued.token).await.expect("revoked");
        let cookie = state.cookie.issue(&issued);

        let (status, body) = call(state, Some(cookie), "/box/me").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let body: Value = serde_json::from_slice(&body).expect("json body");
        assert_eq!(body, json!({ "code": "unauthorized", "message": "Unauthorized" }));
    }
}
