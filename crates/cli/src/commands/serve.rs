use std::sync::Arc;

use anyhow::Result;
use smartmark_auth::{AuthClient, AuthProvider, DevAuth};
use smartmark_core::{User, UserId};
use smartmark_http::{AppState, create_router};
use smartmark_service::{AuthService, BookmarkService};
use smartmark_storage::StorageBackend;

use crate::config::{Config, provider_label};

/// Identity handed out by dev sign-in when no auth backend is configured.
fn dev_user() -> User {
    let mut user = User::new(UserId::from_u128(1));
    user.email = Some("dev@localhost".to_owned());
    user.full_name = Some("Local Developer".to_owned());
    user
}

pub(crate) async fn run(config: &Config, port: u16, host: String, force_memory: bool) -> Result<()> {
    let storage = match config.database_url.as_deref() {
        Some(url) if !force_memory => {
            let storage = StorageBackend::new_postgres(url).await?;
            tracing::info!("Connected to PostgreSQL");
            storage
        },
        Some(_) => {
            tracing::info!("--memory given, ignoring SMARTMARK_DATABASE_URL");
            StorageBackend::new_memory()
        },
        None => {
            tracing::warn!("SMARTMARK_DATABASE_URL not set, bookmarks live in memory until exit");
            StorageBackend::new_memory()
        },
    };

    let public_url = config.public_url.clone().unwrap_or_else(|| format!("http://{host}:{port}"));

    let (auth, label): (Arc<dyn AuthProvider>, String) = match config.auth_url.as_deref() {
        Some(url) => {
            let client =
                AuthClient::new(url, config.anon_key.clone(), config.oauth_provider.clone())?;
            tracing::info!(provider = %config.oauth_provider, auth_url = %client.base_url(), "Using auth backend");
            (Arc::new(client), provider_label(&config.oauth_provider))
        },
        None => {
            tracing::warn!("SMARTMARK_AUTH_URL not set, every sign-in becomes the local dev user");
            (Arc::new(DevAuth::new(dev_user())), "local dev account".to_owned())
        },
    };

    let state = Arc::new(AppState {
        bookmarks: BookmarkService::new(Arc::new(storage)),
        auth: AuthService::new(auth, &public_url),
        poll_interval: config.poll_interval,
        secure_cookies: config.secure_cookies,
        provider_label: label,
    });

    let router = create_router(state);
    let addr = format!("{host}:{port}");
    tracing::info!(%addr, %public_url, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
