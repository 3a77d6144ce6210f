//! In-process backend with the same contract as PostgreSQL.
//!
//! Used for local development without a database and in tests. Inserts and
//! deletes are published on a broadcast change feed, like the Postgres
//! trigger does.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use smartmark_core::{
    Bookmark, BookmarkChange, BookmarkId, FEED_EVENT_CAPACITY, NewBookmark, UserId,
};
use tokio::sync::{RwLock, broadcast};

use crate::error::StorageError;
use crate::fanout::owner_stream;
use crate::traits::{BookmarkStore, ChangeFeed, ChangeStream};

#[derive(Clone, Debug)]
pub struct MemoryStorage {
    rows: Arc<RwLock<Vec<Bookmark>>>,
    feed_tx: broadcast::Sender<BookmarkChange>,
    feed_enabled: Arc<AtomicBool>,
    list_failing: Arc<AtomicBool>,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        let (feed_tx, _) = broadcast::channel(FEED_EVENT_CAPACITY);
        Self {
            rows: Arc::new(RwLock::new(Vec::new())),
            feed_tx,
            feed_enabled: Arc::new(AtomicBool::new(true)),
            list_failing: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Toggle the change feed. While disabled, `subscribe` fails the way an
    /// unreachable realtime service does; row operations are unaffected.
    pub fn set_feed_enabled(&self, enabled: bool) {
        self.feed_enabled.store(enabled, Ordering::SeqCst);
    }

    /// While set, `list_bookmarks` fails with a pool timeout, like a database
    /// that is briefly unreachable.
    pub fn set_list_failing(&self, failing: bool) {
        self.list_failing.store(failing, Ordering::SeqCst);
    }

    /// Seed a row as-is, without publishing a change.
    pub async fn seed(&self, bookmark: Bookmark) {
        self.rows.write().await.push(bookmark);
    }

    /// Remove a row without publishing a change, as if the notification was lost.
    pub async fn remove_silently(&self, id: BookmarkId) -> bool {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|b| b.id != id);
        rows.len() != before
    }

    fn publish(&self, change: BookmarkChange) {
        // No receivers is fine: nobody is watching right now.
        let _ = self.feed_tx.send(change);
    }
}

#[async_trait]
impl BookmarkStore for MemoryStorage {
    async fn list_bookmarks(&self, owner: UserId) -> Result<Vec<Bookmark>, StorageError> {
        if self.list_failing.load(Ordering::SeqCst) {
            return Err(StorageError::Database(sqlx::Error::PoolTimedOut));
        }
        let rows = self.rows.read().await;
        let mut owned: Vec<Bookmark> = rows.iter().filter(|b| b.user_id == owner).cloned().collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(owned)
    }

    async fn insert_bookmark(&self, new: &NewBookmark) -> Result<Bookmark, StorageError> {
        let row = Bookmark::new(
            BookmarkId::new_v4(),
            new.url.clone(),
            new.title.clone(),
            Utc::now(),
            new.user_id,
        );
        self.rows.write().await.push(row.clone());
        self.publish(BookmarkChange::Created(row.clone()));
        Ok(row)
    }

    async fn delete_bookmark(&self, id: BookmarkId, owner: UserId) -> Result<bool, StorageError> {
        let removed = {
            let mut rows = self.rows.write().await;
            let before = rows.len();
            rows.retain(|b| !(b.id == id && b.user_id == owner));
            rows.len() != before
        };
        if removed {
            self.publish(BookmarkChange::Deleted { id, user_id: owner });
        }
        Ok(removed)
    }
}

#[async_trait]
impl ChangeFeed for MemoryStorage {
    async fn subscribe(&self, owner: UserId) -> Result<ChangeStream, StorageError> {
        if !self.feed_enabled.load(Ordering::SeqCst) {
            return Err(StorageError::Subscription("realtime disabled".to_owned()));
        }
        Ok(owner_stream(self.feed_tx.subscribe(), owner))
    }
}
