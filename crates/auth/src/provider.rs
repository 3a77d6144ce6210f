use async_trait::async_trait;
use smartmark_core::{Session, User};

use crate::AuthError;

/// Auth backend operations consumed by the app.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// URL of the provider consent screen. After consent the browser lands on
    /// `redirect_to` with a `code` query parameter appended.
    fn authorize_url(&self, redirect_to: &str, code_challenge: &str) -> Result<String, AuthError>;

    /// Trades a callback code plus the PKCE verifier for a session.
    async fn exchange_code(&self, code: &str, code_verifier: &str) -> Result<Session, AuthError>;

    /// `Ok(None)` when the token is unknown or expired.
    async fn get_user(&self, access_token: &str) -> Result<Option<User>, AuthError>;

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError>;
}
