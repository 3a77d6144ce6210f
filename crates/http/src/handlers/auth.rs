use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use smartmark_service::CallbackOutcome;

use super::found;
use crate::AppState;
use crate::api_error::ApiError;
use crate::session::{self, PKCE_COOKIE, SESSION_COOKIE};

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    #[serde(default)]
    next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    next: Option<String>,
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LoginQuery>,
    jar: CookieJar,
) -> Result<(CookieJar, Response), ApiError> {
    let redirect = state.auth.begin_login(query.next.as_deref())?;
    let jar = jar.add(session::pkce_cookie(redirect.code_verifier, state.secure_cookies));
    Ok((jar, found(&redirect.authorize_url)))
}

pub async fn callback(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CallbackQuery>,
    jar: CookieJar,
) -> (CookieJar, Response) {
    let verifier = jar.get(PKCE_COOKIE).map(|c| c.value().to_owned());
    let outcome = state
        .auth
        .complete_login(query.code.as_deref(), verifier.as_deref(), query.next.as_deref())
        .await;

    let jar = jar.remove(session::removal(PKCE_COOKIE));
    match outcome {
        CallbackOutcome::SignedIn { session: signed_in, redirect_to } => {
            tracing::info!(user_id = %signed_in.user.id, "Signed in");
            let cookie = session::session_cookie(signed_in.access_token, state.secure_cookies);
            let jar = jar.add(cookie);
            (jar, found(&redirect_to))
        },
        CallbackOutcome::Failed { redirect_to } => (jar, found(&redirect_to)),
    }
}

pub async fn sign_out(State(state): State<Arc<AppState>>, jar: CookieJar) -> (CookieJar, Response) {
    state.auth.sign_out(session::access_token(&jar)).await;
    (jar.remove(session::removal(SESSION_COOKIE)), found("/login"))
}
