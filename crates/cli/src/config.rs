//! Runtime configuration from `SMARTMARK_*` environment variables.

use std::time::Duration;

use anyhow::Result;
use smartmark_core::{
    DEFAULT_OAUTH_PROVIDER, POLL_INTERVAL_SECS, env_non_empty, env_parse_with_default,
};

pub(crate) struct Config {
    /// Unset means in-memory storage.
    pub database_url: Option<String>,
    /// GoTrue-compatible auth API base. Unset means local dev sign-in.
    pub auth_url: Option<String>,
    pub anon_key: String,
    /// Externally visible origin; defaults to `http://<host>:<port>`.
    pub public_url: Option<String>,
    pub oauth_provider: String,
    pub poll_interval: Duration,
    pub secure_cookies: bool,
}

impl Config {
    pub(crate) fn from_env() -> Self {
        let poll_secs = env_parse_with_default("SMARTMARK_POLL_INTERVAL_SECS", POLL_INTERVAL_SECS);
        Self {
            database_url: env_non_empty("SMARTMARK_DATABASE_URL"),
            auth_url: env_non_empty("SMARTMARK_AUTH_URL"),
            anon_key: env_non_empty("SMARTMARK_ANON_KEY").unwrap_or_default(),
            public_url: env_non_empty("SMARTMARK_PUBLIC_URL"),
            oauth_provider: env_non_empty("SMARTMARK_OAUTH_PROVIDER")
                .unwrap_or_else(|| DEFAULT_OAUTH_PROVIDER.to_owned()),
            // Zero would make tokio's interval panic.
            poll_interval: Duration::from_secs(poll_secs.max(1)),
            secure_cookies: env_parse_with_default("SMARTMARK_SECURE_COOKIES", false),
        }
    }

    pub(crate) fn require_database_url(&self) -> Result<&str> {
        self.database_url
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("SMARTMARK_DATABASE_URL must be set for this command"))
    }
}

/// Button label for a provider id: `google` -> `Google`.
pub(crate) fn provider_label(provider: &str) -> String {
    let mut chars = provider.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_label() {
        assert_eq!(provider_label("google"), "Google");
        assert_eq!(provider_label("github"), "Github");
        assert_eq!(provider_label(""), "");
    }
}
