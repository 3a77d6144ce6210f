use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Backend-assigned bookmark identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[cfg_attr(feature = "sqlx-types", derive(sqlx::Type), sqlx(transparent))]
pub struct BookmarkId(pub Uuid);

/// Identifier of the authenticated user owning a bookmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[cfg_attr(feature = "sqlx-types", derive(sqlx::Type), sqlx(transparent))]
pub struct UserId(pub Uuid);

macro_rules! uuid_newtype {
    ($name:ident) => {
        impl $name {
            #[must_use]
            pub const fn from_u128(value: u128) -> Self {
                Self(Uuid::from_u128(value))
            }

            #[must_use]
            pub fn new_v4() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim()).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }
    };
}

uuid_newtype!(BookmarkId);
uuid_newtype!(UserId);

/// A saved link, exactly as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-types", derive(sqlx::FromRow))]
pub struct Bookmark {
    pub id: BookmarkId,
    pub url: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub user_id: UserId,
}

impl Bookmark {
    #[must_use]
    pub fn new(
        id: BookmarkId,
        url: impl Into<String>,
        title: impl Into<String>,
        created_at: DateTime<Utc>,
        user_id: UserId,
    ) -> Self {
        Self { id, url: url.into(), title: title.into(), created_at, user_id }
    }
}

/// Insert payload. `id` and `created_at` are assigned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBookmark {
    pub url: String,
    pub title: String,
    pub user_id: UserId,
}
