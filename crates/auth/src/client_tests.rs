#[cfg(test)]
mod tests {
    use smartmark_core::UserId;
    use url::Url;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::{AuthClient, AuthError, AuthProvider};

    async fn setup() -> (MockServer, AuthClient) {
        let server = MockServer::start().await;
        let client =
            AuthClient::new(&format!("{}/", server.uri()), "anon-key".to_owned(), "google".to_owned())
                .unwrap();
        (server, client)
    }

    fn user_json() -> serde_json::Value {
        serde_json::json!({
            "id": "00000000-0000-0000-0000-000000000001",
            "email": "ada@example.com",
            "user_metadata": {
                "full_name": "Ada Lovelace",
                "avatar_url": "https://img.example/ada.png"
            }
        })
    }

    #[tokio::test]
    async fn test_authorize_url_carries_provider_and_challenge() {
        let (server, client) = setup().await;
        let url = client.authorize_url("http://app.test/auth/callback?next=%2F", "chal").unwrap();
        let url = Url::parse(&url).unwrap();
        assert_eq!(url.path(), "/authorize");
        assert!(url.as_str().starts_with(&server.uri()));
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("provider".to_owned(), "google".to_owned())));
        assert!(pairs.contains(&(
            "redirect_to".to_owned(),
            "http://app.test/auth/callback?next=%2F".to_owned()
        )));
        assert!(pairs.contains(&("code_challenge".to_owned(), "chal".to_owned())));
        assert!(pairs.contains(&("code_challenge_method".to_owned(), "s256".to_owned())));
    }

    #[tokio::test]
    async fn test_exchange_code_success() {
        let (server, client) = setup().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(query_param("grant_type", "pkce"))
            .and(header("apikey", "anon-key"))
            .and(body_json(serde_json::json!({ "auth_code": "abc", "code_verifier": "ver" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "tok",
                "token_type": "bearer",
                "expires_in": 3600,
                "refresh_token": "ref",
                "user": user_json()
            })))
            .expect(1)
            .mount(&server)
            .await;

        let session = client.exchange_code("abc", "ver").await.unwrap();
        assert_eq!(session.access_token, "tok");
        assert_eq!(session.refresh_token.as_deref(), Some("ref"));
        assert_eq!(session.expires_in, Some(3600));
        assert_eq!(session.user.id, UserId::from_u128(1));
        assert_eq!(session.user.display_name(), "Ada Lovelace");
    }

    #[tokio::test]
    async fn test_exchange_code_rejected() {
        let (server, client) = setup().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(
                ResponseTemplate::new(400).set_body_string(r#"{"error":"invalid_grant"}"#),
            )
            .mount(&server)
            .await;

        let err = client.exchange_code("stale", "ver").await.unwrap_err();
        assert!(matches!(err, AuthError::HttpStatus { code: 400, .. }));
        assert!(err.is_rejection());
    }

    #[tokio::test]
    async fn test_exchange_code_malformed_body() {
        let (server, client) = setup().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client.exchange_code("abc", "ver").await.unwrap_err();
        assert!(matches!(err, AuthError::JsonParse { .. }));
        assert!(!err.is_rejection());
    }

    #[tokio::test]
    async fn test_empty_code_never_hits_network() {
        let (server, client) = setup().await;
        Mock::given(method("POST")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;
        assert!(matches!(client.exchange_code("", "ver").await, Err(AuthError::InvalidCode)));
    }

    #[tokio::test]
    async fn test_get_user_with_valid_token() {
        let (server, client) = setup().await;
        Mock::given(method("GET"))
            .and(path("/user"))
            .and(header("Authorization", "Bearer tok"))
            .and(header("apikey", "anon-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
            .mount(&server)
            .await;

        let user = client.get_user("tok").await.unwrap().unwrap();
        assert_eq!(user.email.as_deref(), Some("ada@example.com"));
        assert_eq!(user.avatar_url.as_deref(), Some("https://img.example/ada.png"));
    }

    #[tokio::test]
    async fn test_get_user_expired_token_is_none() {
        let (server, client) = setup().await;
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        assert_eq!(client.get_user("expired").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_user_server_error_propagates() {
        let (server, client) = setup().await;
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(503).set_body_string("down"))
            .mount(&server)
            .await;

        let err = client.get_user("tok").await.unwrap_err();
        assert!(matches!(err, AuthError::HttpStatus { code: 503, ref body } if body == "down"));
    }

    #[tokio::test]
    async fn test_sign_out_tolerates_missing_session() {
        let (server, client) = setup().await;
        Mock::given(method("POST"))
            .and(path("/logout"))
            .and(header("Authorization", "Bearer gone"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/logout"))
            .and(header("Authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        client.sign_out("gone").await.unwrap();
        client.sign_out("tok").await.unwrap();
    }

    #[test]
    fn test_debug_hides_anon_key() {
        let client =
            AuthClient::new("http://auth.test", "super-secret".to_owned(), "github".to_owned())
                .unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("github"));
    }
}
