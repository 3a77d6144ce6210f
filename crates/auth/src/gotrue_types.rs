use serde::{Deserialize, Serialize};
use smartmark_core::{Session, User, UserId};

#[derive(Serialize)]
pub(crate) struct PkceTokenRequest<'a> {
    pub auth_code: &'a str,
    pub code_verifier: &'a str,
}

#[derive(Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    pub user: UserResponse,
}

#[derive(Deserialize)]
pub(crate) struct UserResponse {
    pub id: UserId,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

#[derive(Deserialize, Default)]
pub(crate) struct UserMetadata {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

impl From<UserResponse> for User {
    fn from(raw: UserResponse) -> Self {
        let UserMetadata { full_name, name, avatar_url, picture } = raw.user_metadata;
        Self {
            id: raw.id,
            email: raw.email.filter(|e| !e.is_empty()),
            full_name: full_name.or(name),
            avatar_url: avatar_url.or(picture),
        }
    }
}

impl From<TokenResponse> for Session {
    fn from(raw: TokenResponse) -> Self {
        Self {
            access_token: raw.access_token,
            refresh_token: raw.refresh_token,
            expires_in: raw.expires_in,
            user: raw.user.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_falls_back_to_oidc_claims() {
        let raw: UserResponse = serde_json::from_value(serde_json::json!({
            "id": "00000000-0000-0000-0000-000000000007",
            "email": "",
            "user_metadata": { "name": "Grace", "picture": "https://img.example/g.png" }
        }))
        .unwrap();
        let user = User::from(raw);
        assert_eq!(user.id, UserId::from_u128(7));
        assert_eq!(user.email, None);
        assert_eq!(user.full_name.as_deref(), Some("Grace"));
        assert_eq!(user.avatar_url.as_deref(), Some("https://img.example/g.png"));
    }
}
