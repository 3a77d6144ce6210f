use std::sync::Arc;

use smartmark_core::{
    Bookmark, BookmarkChange, BookmarkDraft, BookmarkId, LOCAL_EVENT_CAPACITY, UserId,
};
use smartmark_storage::{BookmarkStore, ChangeFeed, ChangeStream, StorageBackend};
use tokio::sync::broadcast;

use crate::ServiceError;

/// Owner-scoped bookmark operations.
///
/// Successful adds and issued deletes are also published on an in-process
/// broadcast channel so live views apply them without waiting for the
/// change feed or the next poll.
#[derive(Clone)]
pub struct BookmarkService {
    storage: Arc<StorageBackend>,
    local_tx: broadcast::Sender<BookmarkChange>,
}

impl BookmarkService {
    #[must_use]
    pub fn new(storage: Arc<StorageBackend>) -> Self {
        let (local_tx, _) = broadcast::channel(LOCAL_EVENT_CAPACITY);
        Self { storage, local_tx }
    }

    #[must_use]
    pub const fn storage(&self) -> &Arc<StorageBackend> {
        &self.storage
    }

    pub async fn list(&self, owner: UserId) -> Result<Vec<Bookmark>, ServiceError> {
        Ok(self.storage.list_bookmarks(owner).await?)
    }

    /// Validates the draft, inserts it, and announces the stored row locally.
    pub async fn add(&self, owner: UserId, draft: BookmarkDraft) -> Result<Bookmark, ServiceError> {
        let new = draft.into_new_bookmark(owner)?;
        let row = self.storage.insert_bookmark(&new).await?;
        tracing::info!(id = %row.id, user_id = %owner, "Bookmark added");
        self.publish(BookmarkChange::Created(row.clone()));
        Ok(row)
    }

    /// Removes the row from live views as soon as the delete is issued, then
    /// deletes it in storage. A failed delete reappears on the next poll.
    pub async fn delete(&self, owner: UserId, id: BookmarkId) -> Result<bool, ServiceError> {
        self.publish(BookmarkChange::Deleted { id, user_id: owner });
        let deleted = self.storage.delete_bookmark(id, owner).await?;
        if deleted {
            tracing::info!(%id, user_id = %owner, "Bookmark deleted");
        } else {
            tracing::debug!(%id, user_id = %owner, "Delete matched no row");
        }
        Ok(deleted)
    }

    pub fn subscribe_local(&self) -> broadcast::Receiver<BookmarkChange> {
        self.local_tx.subscribe()
    }

    pub async fn subscribe_feed(&self, owner: UserId) -> Result<ChangeStream, ServiceError> {
        Ok(self.storage.subscribe(owner).await?)
    }

    fn publish(&self, change: BookmarkChange) {
        // No open views is fine.
        let _ = self.local_tx.send(change);
    }
}
