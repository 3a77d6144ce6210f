//! Local sign-in for development and tests.
//!
//! `authorize_url` skips the consent screen and points straight back at the
//! callback with a one-time code. The code is bound to the PKCE challenge, so
//! the callback path runs exactly as it would against a real backend.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use smartmark_core::{Session, User};
use url::Url;
use uuid::Uuid;

use crate::error::AuthError;
use crate::pkce::challenge_for;
use crate::provider::AuthProvider;

/// Unredeemed codes kept at once; the oldest is evicted past this.
const MAX_PENDING_CODES: usize = 64;

#[derive(Debug, Default)]
struct DevState {
    /// (code, PKCE challenge), oldest first
    pending: VecDeque<(String, String)>,
    /// access token -> user
    sessions: HashMap<String, User>,
}

#[derive(Debug)]
pub struct DevAuth {
    user: User,
    state: Mutex<DevState>,
}

impl DevAuth {
    #[must_use]
    pub fn new(user: User) -> Self {
        Self { user, state: Mutex::new(DevState::default()) }
    }

    fn state(&self) -> std::sync::MutexGuard<'_, DevState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Issues a session directly, bypassing the redirect dance.
    pub fn issue_session(&self) -> Session {
        let access_token = format!("dev-{}", Uuid::new_v4().simple());
        self.state().sessions.insert(access_token.clone(), self.user.clone());
        Session {
            access_token,
            refresh_token: None,
            expires_in: None,
            user: self.user.clone(),
        }
    }
}

#[async_trait]
impl AuthProvider for DevAuth {
    fn authorize_url(&self, redirect_to: &str, code_challenge: &str) -> Result<String, AuthError> {
        let mut url =
            Url::parse(redirect_to).map_err(|e| AuthError::InvalidUrl(format!("{redirect_to}: {e}")))?;
        let code = Uuid::new_v4().simple().to_string();
        url.query_pairs_mut().append_pair("code", &code);
        let mut state = self.state();
        if state.pending.len() >= MAX_PENDING_CODES {
            state.pending.pop_front();
        }
        state.pending.push_back((code, code_challenge.to_owned()));
        Ok(url.into())
    }

    async fn exchange_code(&self, code: &str, code_verifier: &str) -> Result<Session, AuthError> {
        let pending = {
            let mut state = self.state();
            let index = state.pending.iter().position(|(c, _)| c == code);
            index.and_then(|i| state.pending.remove(i))
        };
        let (_, challenge) = pending.ok_or(AuthError::InvalidCode)?;
        if challenge_for(code_verifier) != challenge {
            return Err(AuthError::InvalidCode);
        }
        let session = self.issue_session();
        tracing::info!(user_id = %session.user.id, "Dev sign-in");
        Ok(session)
    }

    async fn get_user(&self, access_token: &str) -> Result<Option<User>, AuthError> {
        Ok(self.state().sessions.get(access_token).cloned())
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        self.state().sessions.remove(access_token);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use smartmark_core::UserId;

    use super::*;
    use crate::PkcePair;

    fn dev() -> DevAuth {
        let mut user = User::new(UserId::from_u128(42));
        user.email = Some("dev@localhost".to_owned());
        DevAuth::new(user)
    }

    fn code_from(url: &str) -> String {
        let url = Url::parse(url).unwrap();
        url.query_pairs().find(|(k, _)| k == "code").map(|(_, v)| v.into_owned()).unwrap()
    }

    #[tokio::test]
    async fn test_full_sign_in_cycle() {
        let auth = dev();
        let pkce = PkcePair::generate().unwrap();
        let url = auth
            .authorize_url("http://localhost:3000/auth/callback?next=%2F", &pkce.challenge)
            .unwrap();
        assert!(url.starts_with("http://localhost:3000/auth/callback?next=%2F&code="));

        let session = auth.exchange_code(&code_from(&url), &pkce.verifier).await.unwrap();
        assert_eq!(session.user.id, UserId::from_u128(42));
        assert_eq!(auth.get_user(&session.access_token).await.unwrap(), Some(session.user.clone()));

        auth.sign_out(&session.access_token).await.unwrap();
        assert_eq!(auth.get_user(&session.access_token).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_code_is_single_use_and_bound_to_verifier() {
        let auth = dev();
        let pkce = PkcePair::generate().unwrap();
        let other = PkcePair::generate().unwrap();

        let url = auth.authorize_url("http://localhost/cb", &pkce.challenge).unwrap();
        let code = code_from(&url);
        assert!(matches!(
            auth.exchange_code(&code, &other.verifier).await,
            Err(AuthError::InvalidCode)
        ));
        // A failed exchange burns the code.
        assert!(matches!(
            auth.exchange_code(&code, &pkce.verifier).await,
            Err(AuthError::InvalidCode)
        ));
        assert!(matches!(auth.exchange_code("", &pkce.verifier).await, Err(AuthError::InvalidCode)));
    }

    #[tokio::test]
    async fn test_abandoned_codes_are_evicted_oldest_first() {
        let auth = dev();
        let pkce = PkcePair::generate().unwrap();
        let oldest = code_from(&auth.authorize_url("http://localhost/cb", &pkce.challenge).unwrap());
        let mut newest = String::new();
        for _ in 0..MAX_PENDING_CODES {
            newest = code_from(&auth.authorize_url("http://localhost/cb", &pkce.challenge).unwrap());
        }

        assert_eq!(auth.state().pending.len(), MAX_PENDING_CODES);
        assert!(matches!(
            auth.exchange_code(&oldest, &pkce.verifier).await,
            Err(AuthError::InvalidCode)
        ));
        assert!(auth.exchange_code(&newest, &pkce.verifier).await.is_ok());
    }
}
