//! Cookie-backed session: the access token and the in-flight PKCE verifier.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use smartmark_core::User;

use crate::AppState;
use crate::api_error::ApiError;

pub const SESSION_COOKIE: &str = "sm_session";
pub const PKCE_COOKIE: &str = "sm_pkce";

#[must_use]
pub fn access_token(jar: &CookieJar) -> Option<&str> {
    jar.get(SESSION_COOKIE).map(Cookie::value)
}

#[must_use]
pub fn session_cookie(access_token: String, secure: bool) -> Cookie<'static> {
    http_only(SESSION_COOKIE, access_token, secure)
}

#[must_use]
pub fn pkce_cookie(verifier: String, secure: bool) -> Cookie<'static> {
    http_only(PKCE_COOKIE, verifier, secure)
}

/// Removal cookie matching the attributes the named cookie was set with.
#[must_use]
pub fn removal(name: &'static str) -> Cookie<'static> {
    Cookie::build(name).path("/").build()
}

fn http_only(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    // Lax so the cookie rides along on the top-level redirect back from the provider.
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

/// The signed-in user, resolved from the session cookie by the auth backend.
///
/// Rejects with 401 `"Not authenticated"` when the cookie is missing or the
/// backend no longer accepts the token.
pub struct CurrentUser(pub User);

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let user = state.auth.require_user(access_token(&jar)).await?;
        Ok(Self(user))
    }
}
