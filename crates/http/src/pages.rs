//! Embedded HTML pages.
//!
//! `/login` is the unauthenticated entry page; `/` is the bookmark list, which
//! renders the snapshots streamed by `/events` and talks to the JSON API.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use smartmark_core::User;

use crate::AppState;
use crate::handlers::found;
use crate::session::access_token;

pub const LOGIN_HTML: &str = include_str!("login.html");
pub const INDEX_HTML: &str = include_str!("index.html");

pub async fn index(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    if signed_in(&state, &jar).await.is_none() {
        return found("/login");
    }
    html(INDEX_HTML.to_owned())
}

pub async fn login(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    if signed_in(&state, &jar).await.is_some() {
        return found("/");
    }
    html(LOGIN_HTML.replace("{{provider}}", &escape_html(&state.provider_label)))
}

/// Backend failures count as signed out; the visitor lands on `/login`.
async fn signed_in(state: &AppState, jar: &CookieJar) -> Option<User> {
    match state.auth.current_user(access_token(jar)).await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!(error = %e, "Session check failed");
            None
        },
    }
}

fn html(body: String) -> Response {
    (StatusCode::OK, [(header::CONTENT_TYPE, "text/html; charset=utf-8")], Html(body))
        .into_response()
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
