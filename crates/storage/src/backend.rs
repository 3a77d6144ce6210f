//! Unified storage backend with enum dispatch.

use async_trait::async_trait;
use smartmark_core::{Bookmark, BookmarkId, NewBookmark, UserId};

use crate::error::StorageError;
use crate::traits::{BookmarkStore, ChangeFeed, ChangeStream};
use crate::{MemoryStorage, PgStorage};

macro_rules! dispatch {
    ($self:expr, $trait:path, $method:ident ( $($arg:expr),* $(,)? )) => {
        match $self {
            StorageBackend::Postgres(s) => <PgStorage as $trait>::$method(s, $($arg),*).await,
            StorageBackend::Memory(s) => <MemoryStorage as $trait>::$method(s, $($arg),*).await,
        }
    };
}

#[derive(Clone, Debug)]
pub enum StorageBackend {
    Postgres(PgStorage),
    Memory(MemoryStorage),
}

impl StorageBackend {
    pub async fn new_postgres(database_url: &str) -> Result<Self, StorageError> {
        Ok(Self::Postgres(PgStorage::new(database_url).await?))
    }

    #[must_use]
    pub fn new_memory() -> Self {
        Self::Memory(MemoryStorage::new())
    }
}

// ── BookmarkStore ────────────────────────────────────────────────

#[async_trait]
impl BookmarkStore for StorageBackend {
    async fn list_bookmarks(&self, owner: UserId) -> Result<Vec<Bookmark>, StorageError> {
        dispatch!(self, BookmarkStore, list_bookmarks(owner))
    }

    async fn insert_bookmark(&self, new: &NewBookmark) -> Result<Bookmark, StorageError> {
        dispatch!(self, BookmarkStore, insert_bookmark(new))
    }

    async fn delete_bookmark(&self, id: BookmarkId, owner: UserId) -> Result<bool, StorageError> {
        dispatch!(self, BookmarkStore, delete_bookmark(id, owner))
    }
}

// ── ChangeFeed ───────────────────────────────────────────────────

#[async_trait]
impl ChangeFeed for StorageBackend {
    async fn subscribe(&self, owner: UserId) -> Result<ChangeStream, StorageError> {
        dispatch!(self, ChangeFeed, subscribe(owner))
    }
}
