//! HTTP server for smartmark.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(unreachable_pub, reason = "pub items are re-exported")]
#![allow(clippy::absolute_paths, reason = "Explicit paths for clarity")]
#![allow(unused_results, reason = "Some results are intentionally ignored")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short closure params are idiomatic")]
#![allow(clippy::exhaustive_structs, reason = "HTTP types are stable")]
#![allow(clippy::single_call_fn, reason = "Helper functions improve readability")]

pub mod api_error;
mod handlers;
mod pages;
pub mod session;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    routing::{delete, get, post},
};
use smartmark_service::{AuthService, BookmarkService};
use tower_http::trace::TraceLayer;

/// Shared application state for all HTTP handlers.
pub struct AppState {
    pub bookmarks: BookmarkService,
    pub auth: AuthService,
    /// Interval between full-list polls of each live view.
    pub poll_interval: Duration,
    /// Mark session cookies `Secure` (HTTPS deployments).
    pub secure_cookies: bool,
    /// Shown on the sign-in button, e.g. "Google".
    pub provider_label: String,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/login", get(pages::login))
        .route("/health", get(health))
        .route("/auth/login", get(handlers::auth::login))
        .route("/auth/callback", get(handlers::auth::callback))
        .route("/auth/signout", post(handlers::auth::sign_out))
        .route("/api/me", get(handlers::bookmarks::me))
        .route(
            "/api/bookmarks",
            get(handlers::bookmarks::list_bookmarks).post(handlers::bookmarks::create_bookmark),
        )
        .route("/api/bookmarks/{id}", delete(handlers::bookmarks::delete_bookmark))
        .route("/events", get(handlers::events::sse_bookmarks))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
