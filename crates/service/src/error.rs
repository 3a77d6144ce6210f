//! Typed error enum for the service layer.
//!
//! Unifies storage, auth, and validation failures into a single error type,
//! so handlers can map each failure mode to a response without downcasting.

use smartmark_auth::AuthError;
use smartmark_core::ValidationError;
use smartmark_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage operation failed (database or change feed).
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// Auth backend call failed.
    #[error("auth: {0}")]
    Auth(#[from] AuthError),

    /// Form input rejected before any backend call.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// No session, or the auth backend no longer accepts it.
    #[error("Not authenticated")]
    Unauthenticated,
}

impl ServiceError {
    /// Whether a later retry of the same storage call is likely to succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Storage(e) if e.is_transient())
    }
}
