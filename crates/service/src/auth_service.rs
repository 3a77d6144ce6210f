use std::sync::Arc;

use smartmark_auth::{AuthProvider, PkcePair};
use smartmark_core::{AUTH_FAILED_REDIRECT, Session, User};
use url::Url;

use crate::ServiceError;

/// Browser redirect that starts an OAuth sign-in.
#[derive(Debug)]
pub struct LoginRedirect {
    pub authorize_url: String,
    /// Kept by the browser until the callback, never sent to the provider.
    pub code_verifier: String,
}

/// Result of handling `/auth/callback`.
#[derive(Debug)]
pub enum CallbackOutcome {
    SignedIn { session: Session, redirect_to: String },
    Failed { redirect_to: String },
}

impl CallbackOutcome {
    #[must_use]
    pub fn redirect_to(&self) -> &str {
        match self {
            Self::SignedIn { redirect_to, .. } | Self::Failed { redirect_to } => redirect_to,
        }
    }
}

/// Accepts only app-relative paths; anything else becomes `/`.
///
/// Browsers strip tabs and newlines from a `Location` before resolving it, so
/// `/\t/host` would land on `//host`. Any control character is rejected.
#[must_use]
pub fn sanitize_next(next: Option<&str>) -> String {
    match next {
        Some(path) if is_app_relative(path) => path.to_owned(),
        _ => "/".to_owned(),
    }
}

fn is_app_relative(path: &str) -> bool {
    path.starts_with('/')
        && !path.starts_with("//")
        && !path.contains('\\')
        && !path.chars().any(char::is_control)
}

pub struct AuthService {
    provider: Arc<dyn AuthProvider>,
    public_url: String,
}

impl AuthService {
    #[must_use]
    pub fn new(provider: Arc<dyn AuthProvider>, public_url: &str) -> Self {
        Self { provider, public_url: public_url.trim_end_matches('/').to_owned() }
    }

    /// `Ok(None)` when there is no token or the backend rejects it.
    pub async fn current_user(&self, access_token: Option<&str>) -> Result<Option<User>, ServiceError> {
        let Some(token) = access_token.filter(|t| !t.is_empty()) else {
            return Ok(None);
        };
        Ok(self.provider.get_user(token).await?)
    }

    pub async fn require_user(&self, access_token: Option<&str>) -> Result<User, ServiceError> {
        self.current_user(access_token).await?.ok_or(ServiceError::Unauthenticated)
    }

    pub fn begin_login(&self, next: Option<&str>) -> Result<LoginRedirect, ServiceError> {
        let pkce = PkcePair::generate()?;
        let callback = self.callback_url(next)?;
        let authorize_url = self.provider.authorize_url(&callback, &pkce.challenge)?;
        Ok(LoginRedirect { authorize_url, code_verifier: pkce.verifier })
    }

    /// One-shot transition: a session and `next` on success, the login page
    /// with an error flag otherwise. Never retried.
    pub async fn complete_login(
        &self,
        code: Option<&str>,
        code_verifier: Option<&str>,
        next: Option<&str>,
    ) -> CallbackOutcome {
        let failed = || CallbackOutcome::Failed { redirect_to: AUTH_FAILED_REDIRECT.to_owned() };

        let Some(code) = code.filter(|c| !c.is_empty()) else {
            tracing::error!("Auth callback without code");
            return failed();
        };
        let Some(verifier) = code_verifier.filter(|v| !v.is_empty()) else {
            tracing::error!("Auth callback without PKCE verifier");
            return failed();
        };
        match self.provider.exchange_code(code, verifier).await {
            Ok(session) => {
                CallbackOutcome::SignedIn { session, redirect_to: sanitize_next(next) }
            },
            Err(e) => {
                tracing::error!(error = %e, rejected = e.is_rejection(), "Auth code exchange failed");
                failed()
            },
        }
    }

    /// Best effort: backend failures are logged, the local session is dropped regardless.
    pub async fn sign_out(&self, access_token: Option<&str>) {
        let Some(token) = access_token.filter(|t| !t.is_empty()) else {
            return;
        };
        if let Err(e) = self.provider.sign_out(token).await {
            tracing::warn!(error = %e, "Auth backend sign-out failed");
        }
    }

    fn callback_url(&self, next: Option<&str>) -> Result<String, ServiceError> {
        let mut url = Url::parse(&format!("{}/auth/callback", self.public_url))
            .map_err(|e| smartmark_auth::AuthError::InvalidUrl(format!("{}: {e}", self.public_url)))?;
        if next.is_some() {
            url.query_pairs_mut().append_pair("next", &sanitize_next(next));
        }
        Ok(url.into())
    }
}

#[cfg(test)]
mod tests {
    use smartmark_auth::DevAuth;
    use smartmark_core::UserId;

    use super::*;

    fn service() -> AuthService {
        let user = User::new(UserId::from_u128(9));
        AuthService::new(Arc::new(DevAuth::new(user)), "http://localhost:3000/")
    }

    fn code_from(url: &str) -> String {
        Url::parse(url)
            .unwrap()
            .query_pairs()
            .find(|(k, _)| k == "code")
            .map(|(_, v)| v.into_owned())
            .unwrap()
    }

    #[test]
    fn test_sanitize_next() {
        assert_eq!(sanitize_next(None), "/");
        assert_eq!(sanitize_next(Some("/")), "/");
        assert_eq!(sanitize_next(Some("/?tab=2")), "/?tab=2");
        assert_eq!(sanitize_next(Some("https://evil.example")), "/");
        assert_eq!(sanitize_next(Some("//evil.example")), "/");
        assert_eq!(sanitize_next(Some("/\\evil.example")), "/");
        assert_eq!(sanitize_next(Some("")), "/");
        assert_eq!(sanitize_next(Some("/\t/evil.example")), "/");
        assert_eq!(sanitize_next(Some("/\n/evil.example")), "/");
        assert_eq!(sanitize_next(Some("/\r\n/evil.example")), "/");
    }

    #[tokio::test]
    async fn test_login_round_trip_redirects_to_next() {
        let auth = service();
        let login = auth.begin_login(Some("/?tab=2")).unwrap();
        assert!(login.authorize_url.starts_with("http://localhost:3000/auth/callback?next="));

        let outcome = auth
            .complete_login(
                Some(code_from(&login.authorize_url).as_str()),
                Some(login.code_verifier.as_str()),
                Some("/?tab=2"),
            )
            .await;
        let CallbackOutcome::SignedIn { session, redirect_to } = outcome else {
            panic!("expected sign-in");
        };
        assert_eq!(redirect_to, "/?tab=2");
        let user = auth.require_user(Some(session.access_token.as_str())).await.unwrap();
        assert_eq!(user.id, UserId::from_u128(9));
    }

    #[tokio::test]
    async fn test_external_next_falls_back_to_root() {
        let auth = service();
        let login = auth.begin_login(None).unwrap();
        let outcome = auth
            .complete_login(
                Some(code_from(&login.authorize_url).as_str()),
                Some(login.code_verifier.as_str()),
                Some("https://evil.example"),
            )
            .await;
        assert!(matches!(outcome, CallbackOutcome::SignedIn { .. }));
        assert_eq!(outcome.redirect_to(), "/");
    }

    #[tokio::test]
    async fn test_missing_or_bad_code_fails() {
        let auth = service();
        let outcome = auth.complete_login(None, Some("verifier"), None).await;
        assert!(matches!(outcome, CallbackOutcome::Failed { .. }));
        assert_eq!(outcome.redirect_to(), "/login?error=auth_failed");

        let login = auth.begin_login(None).unwrap();
        let code = code_from(&login.authorize_url);
        let outcome = auth.complete_login(Some(code.as_str()), None, None).await;
        assert_eq!(outcome.redirect_to(), "/login?error=auth_failed");

        let outcome =
            auth.complete_login(Some("bogus"), Some(login.code_verifier.as_str()), None).await;
        assert_eq!(outcome.redirect_to(), "/login?error=auth_failed");
    }

    #[tokio::test]
    async fn test_sign_out_drops_session() {
        let auth = service();
        let login = auth.begin_login(None).unwrap();
        let code = code_from(&login.authorize_url);
        let CallbackOutcome::SignedIn { session, .. } =
            auth.complete_login(Some(code.as_str()), Some(login.code_verifier.as_str()), None).await
        else {
            panic!("expected sign-in");
        };
        auth.sign_out(Some(session.access_token.as_str())).await;
        assert!(matches!(
            auth.require_user(Some(session.access_token.as_str())).await,
            Err(ServiceError::Unauthenticated)
        ));
        assert!(auth.current_user(None).await.unwrap().is_none());
    }
}
