//! Service layer for smartmark
//!
//! Centralizes business logic between HTTP handlers and the storage/auth backends.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::let_underscore_must_use, reason = "Intentionally ignoring results")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::cognitive_complexity, reason = "Complex async flows are inherent")]
#![allow(clippy::min_ident_chars, reason = "Short error vars are idiomatic")]

mod auth_service;
mod bookmark_service;
mod error;
mod live_view;

pub use auth_service::{AuthService, CallbackOutcome, LoginRedirect, sanitize_next};
pub use bookmark_service::BookmarkService;
pub use error::ServiceError;
pub use live_view::LiveView;
