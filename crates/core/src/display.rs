//! Presentation helpers for list rows.

use chrono::{DateTime, Utc};
use serde::Serialize;
use url::Url;

use crate::{Bookmark, FAVICON_SERVICE_URL};

/// Favicon image URL for the bookmark's host, or `None` when the URL has no host.
#[must_use]
pub fn favicon_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    Some(format!("{FAVICON_SERVICE_URL}?domain={host}&sz=32"))
}

/// Short date label, e.g. `Oct 16, 2026`.
#[must_use]
pub fn created_label(created_at: &DateTime<Utc>) -> String {
    created_at.format("%b %-d, %Y").to_string()
}

/// A bookmark plus the derived fields the browser renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookmarkRow {
    #[serde(flatten)]
    pub bookmark: Bookmark,
    pub favicon_url: Option<String>,
    pub created_label: String,
}

impl From<Bookmark> for BookmarkRow {
    fn from(bookmark: Bookmark) -> Self {
        let favicon_url = favicon_url(&bookmark.url);
        let created_label = created_label(&bookmark.created_at);
        Self { bookmark, favicon_url, created_label }
    }
}
