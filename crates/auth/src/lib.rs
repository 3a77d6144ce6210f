//! Authentication for smartmark
//!
//! The [`AuthProvider`] seam covers the four auth-backend operations the
//! app consumes: building the provider redirect, exchanging the callback
//! code for a session, resolving the current user from an access token, and
//! signing out. [`AuthClient`] talks to a GoTrue-compatible HTTP API;
//! [`DevAuth`] signs in a fixed local user without any network.

#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]

mod client;
mod client_tests;
mod dev;
mod error;
mod gotrue_types;
mod pkce;
mod provider;

pub use client::AuthClient;
pub use dev::DevAuth;
pub use error::AuthError;
pub use pkce::{PkcePair, challenge_for};
pub use provider::AuthProvider;
