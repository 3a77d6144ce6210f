#![allow(clippy::shadow_reuse, reason = "Shadowing for Arc clones is idiomatic")]
#![allow(clippy::shadow_unrelated, reason = "Shadowing in async blocks is idiomatic")]
#![allow(clippy::single_call_fn, reason = "HTTP handlers are called once from router")]

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

pub mod auth;
pub mod bookmarks;
pub mod events;

/// `302 Found` to `location`.
pub(crate) fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_owned())]).into_response()
}
