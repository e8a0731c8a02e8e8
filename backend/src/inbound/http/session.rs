//! Session cookie helpers and the authenticated-user extractor.
//!
//! The cookie carries only the opaque token; everything else lives in the
//! session store behind [`crate::domain::ports::SessionService`].

use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use chrono::Utc;
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::{Error, IssuedSession, SessionToken, UserId};

/// Name of the cookie holding the session token.
pub const SESSION_COOKIE_NAME: &str = "session";

/// Message returned whenever a protected route lacks a live session.
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";

/// Attributes applied to the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionCookieConfig {
    /// Emit the `Secure` attribute; disable only for plain-HTTP development.
    pub secure: bool,
}

impl Default for SessionCookieConfig {
    fn default() -> Self {
        Self { secure: true }
    }
}

impl SessionCookieConfig {
    /// Cookie delivering a freshly issued session.
    pub fn issue(&self, session: &IssuedSession) -> Cookie<'static> {
        let remaining = (session.expires_at - Utc::now()).num_seconds().max(0);
        Cookie::build(SESSION_COOKIE_NAME, session.token.as_str().to_owned())
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .max_age(CookieDuration::seconds(remaining))
            .finish()
    }

    /// Cookie instructing the browser to drop the session.
    pub fn clear(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build(SESSION_COOKIE_NAME, "")
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .finish();
        cookie.make_removal();
        cookie
    }
}

/// Parse the session token from a request cookie.
///
/// Malformed values are treated as absent so they surface as 401 rather than
/// 400.
pub fn token_from_cookie(cookie: Option<Cookie<'_>>) -> Option<SessionToken> {
    let cookie = cookie?;
    match SessionToken::parse(cookie.value()) {
        Ok(token) => Some(token),
        Err(error) => {
            debug!(%error, "ignoring malformed session cookie");
            None
        }
    }
}

/// Session token presented with `req`, if any.
pub fn request_token(req: &HttpRequest) -> Option<SessionToken> {
    token_from_cookie(req.cookie(SESSION_COOKIE_NAME))
}

/// Identity of the caller, inserted by the session gate middleware.
///
/// Handlers take this as an argument instead of reading cookies themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(pub UserId);

impl AuthenticatedUser {
    /// Id of the authenticated user.
    pub fn user_id(&self) -> UserId {
        self.0
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let found = req.extensions().get::<Self>().copied();
        ready(found.ok_or_else(|| Error::unauthorized(UNAUTHORIZED_MESSAGE).into()))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test as actix_test, web};
    use chrono::Duration;
    use rstest::rstest;

    fn issued(ttl: Duration) -> IssuedSession {
        IssuedSession {
            token: SessionToken::generate(),
            expires_at: Utc::now() + ttl,
        }
    }

    #[rstest]
    #[case(true)]
    #[case(false)]
    fn issued_cookie_is_locked_down(#[case] secure: bool) {
        let session = issued(Duration::minutes(30));
        let cookie = SessionCookieConfig { secure }.issue(&session);
        assert_eq!(cookie.name(), SESSION_COOKIE_NAME);
        assert_eq!(cookie.value(), session.token.as_str());
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.secure(), Some(secure));
        let max_age = cookie.max_age().expect("max age").whole_seconds();
        assert!((1_790..=1_800).contains(&max_age));
    }

    #[rstest]
    fn cleared_cookie_expires_immediately() {
        let cookie = SessionCookieConfig::default().clear();
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(CookieDuration::ZERO));
    }

    #[rstest]
    #[case(Some("not-a-token"), false)]
    #[case(None, false)]
    fn unusable_cookies_yield_no_token(#[case] value: Option<&str>, #[case] expected: bool) {
        let cookie = value.map(|raw| Cookie::new(SESSION_COOKIE_NAME, raw.to_owned()));
        assert_eq!(token_from_cookie(cookie).is_some(), expected);
    }

    #[rstest]
    fn well_formed_cookie_yields_token() {
        let token = SessionToken::generate();
        let cookie = Cookie::new(SESSION_COOKIE_NAME, token.as_str().to_owned());
        assert_eq!(token_from_cookie(Some(cookie)), Some(token));
    }

    #[actix_web::test]
    async fn extractor_without_gate_is_unauthorized() {
        let app = actix_test::init_service(App::new().route(
            "/",
            web::get().to(|user: AuthenticatedUser| async move {
                HttpResponse::Ok().body(user.user_id().to_string())
            }),
        ))
        .await;
        let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = actix_test::read_body_json(res).await;
        assert_eq!(body["message"], UNAUTHORIZED_MESSAGE);
    }
}
