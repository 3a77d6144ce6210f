use async_trait::async_trait;
use reqwest::StatusCode;
use smartmark_core::{Session, User};
use url::Url;

use crate::error::AuthError;
use crate::gotrue_types::{PkceTokenRequest, TokenResponse, UserResponse};
use crate::provider::AuthProvider;

/// Client for a GoTrue-compatible auth API (`/authorize`, `/token`, `/user`, `/logout`).
pub struct AuthClient {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
    provider: String,
}

impl std::fmt::Debug for AuthClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthClient")
            .field("client", &self.client)
            .field("base_url", &self.base_url)
            .field("anon_key", &"***")
            .field("provider", &self.provider)
            .finish()
    }
}

impl AuthClient {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(base_url: &str, anon_key: String, provider: String) -> Result<Self, AuthError> {
        let base_url = base_url.trim_end_matches('/').to_owned();
        let client = reqwest::Client::builder()
            .user_agent(concat!("smartmark/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AuthError::ClientInit(e.to_string()))?;
        Ok(Self { client, base_url, anon_key, provider })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn error_status(response: reqwest::Response) -> AuthError {
        let code = response.status().as_u16();
        let body =
            response.text().await.unwrap_or_else(|_| "Could not read error body".to_owned());
        AuthError::HttpStatus { code, body }
    }
}

#[async_trait]
impl AuthProvider for AuthClient {
    fn authorize_url(&self, redirect_to: &str, code_challenge: &str) -> Result<String, AuthError> {
        let mut url = Url::parse(&format!("{}/authorize", self.base_url))
            .map_err(|e| AuthError::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        url.query_pairs_mut()
            .append_pair("provider", &self.provider)
            .append_pair("redirect_to", redirect_to)
            .append_pair("code_challenge", code_challenge)
            .append_pair("code_challenge_method", "s256");
        Ok(url.into())
    }

    async fn exchange_code(&self, code: &str, code_verifier: &str) -> Result<Session, AuthError> {
        if code.is_empty() {
            return Err(AuthError::InvalidCode);
        }
        let response = self
            .client
            .post(format!("{}/token", self.base_url))
            .query(&[("grant_type", "pkce")])
            .header("apikey", &self.anon_key)
            .json(&PkceTokenRequest { auth_code: code, code_verifier })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_status(response).await);
        }
        let body = response.text().await?;
        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| AuthError::JsonParse { context: "token response".to_owned(), source: e })?;
        let session = Session::from(token);
        tracing::info!(user_id = %session.user.id, "Exchanged auth code for session");
        Ok(session)
    }

    async fn get_user(&self, access_token: &str) -> Result<Option<User>, AuthError> {
        let response = self
            .client
            .get(format!("{}/user", self.base_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => return Ok(None),
            status if !status.is_success() => return Err(Self::error_status(response).await),
            _ => {},
        }
        let body = response.text().await?;
        let user: UserResponse = serde_json::from_str(&body)
            .map_err(|e| AuthError::JsonParse { context: "user response".to_owned(), source: e })?;
        Ok(Some(user.into()))
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let response = self
            .client
            .post(format!("{}/logout", self.base_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        match response.status() {
            // Session already gone upstream.
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => Ok(()),
            status if status.is_success() => Ok(()),
            _ => Err(Self::error_status(response).await),
        }
    }
}
