//! Storage backend trait abstraction
//!
//! Async domain traits for the bookmark table, enabling PostgreSQL in
//! production and an in-memory backend in development via enum dispatch.

use async_trait::async_trait;
use futures_util::stream::BoxStream;
use smartmark_core::{Bookmark, BookmarkChange, BookmarkId, NewBookmark, UserId};

use crate::StorageError;

/// Live stream of changes for one owner. Dropping it releases the subscription.
pub type ChangeStream = BoxStream<'static, BookmarkChange>;

/// Owner-scoped CRUD on bookmarks. Every call filters by owner explicitly.
#[async_trait]
pub trait BookmarkStore: Send + Sync {
    /// All bookmarks of `owner`, newest first.
    async fn list_bookmarks(&self, owner: UserId) -> Result<Vec<Bookmark>, StorageError>;

    /// Insert and return the stored row with its backend-assigned id and timestamp.
    async fn insert_bookmark(&self, new: &NewBookmark) -> Result<Bookmark, StorageError>;

    /// Delete by id and owner. Returns `true` if a row was deleted.
    async fn delete_bookmark(&self, id: BookmarkId, owner: UserId) -> Result<bool, StorageError>;
}

/// Push notifications of inserts and deletes.
#[async_trait]
pub trait ChangeFeed: Send + Sync {
    /// Subscribe to changes of `owner`'s rows.
    ///
    /// No ordering or delivery guarantee; the stream may end at any time.
    async fn subscribe(&self, owner: UserId) -> Result<ChangeStream, StorageError>;
}
