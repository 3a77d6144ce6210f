//! ChangeFeed implementation for PgStorage.
//!
//! One `PgListener` connection per process, fanned out to subscribers through
//! a broadcast channel. The listener is opened lazily on first subscribe and
//! reopened by a later subscribe after it dies.
//!
//! Notifications carry only `id` and `user_id`. Inserted rows are read back by
//! id before they are broadcast.

use async_trait::async_trait;
use serde::Deserialize;
use smartmark_core::{
    Bookmark, BookmarkChange, BookmarkId, BOOKMARK_CHANGES_CHANNEL, FEED_EVENT_CAPACITY, UserId,
};
use sqlx::PgPool;
use sqlx::postgres::PgListener;
use tokio::sync::broadcast;

use super::{BOOKMARK_COLUMNS, PgStorage};
use crate::error::StorageError;
use crate::fanout::owner_stream;
use crate::traits::{ChangeFeed, ChangeStream};

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum FeedPayload {
    #[serde(rename = "INSERT")]
    Insert { record: RowKey },
    #[serde(rename = "DELETE")]
    Delete { old_record: RowKey },
}

#[derive(Debug, Deserialize)]
struct RowKey {
    id: BookmarkId,
    user_id: UserId,
}

/// A decoded `bookmark_changes` notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedNotice {
    Inserted { id: BookmarkId, user_id: UserId },
    Deleted { id: BookmarkId, user_id: UserId },
}

/// Decode a `bookmark_changes` notification payload.
pub fn parse_feed_payload(payload: &str) -> Result<FeedNotice, StorageError> {
    let notice = match serde_json::from_str::<FeedPayload>(payload)? {
        FeedPayload::Insert { record } => FeedNotice::Inserted { id: record.id, user_id: record.user_id },
        FeedPayload::Delete { old_record } => {
            FeedNotice::Deleted { id: old_record.id, user_id: old_record.user_id }
        },
    };
    Ok(notice)
}

/// Turns a notice into a change. `Ok(None)` when an inserted row is already gone.
async fn resolve_notice(pool: &PgPool, notice: FeedNotice) -> Result<Option<BookmarkChange>, StorageError> {
    match notice {
        FeedNotice::Inserted { id, user_id } => {
            let row = sqlx::query_as::<_, Bookmark>(&format!(
                "SELECT {BOOKMARK_COLUMNS} FROM bookmarks WHERE id = $1 AND user_id = $2"
            ))
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;
            Ok(row.map(BookmarkChange::Created))
        },
        FeedNotice::Deleted { id, user_id } => Ok(Some(BookmarkChange::Deleted { id, user_id })),
    }
}

impl PgStorage {
    async fn feed_receiver(&self) -> Result<broadcast::Receiver<BookmarkChange>, StorageError> {
        let mut guard = self.feed.lock().await;
        if let Some(tx) = guard.as_ref().and_then(broadcast::WeakSender::upgrade) {
            return Ok(tx.subscribe());
        }

        let mut listener = PgListener::connect_with(&self.pool)
            .await
            .map_err(|e| StorageError::Subscription(e.to_string()))?;
        listener
            .listen(BOOKMARK_CHANGES_CHANNEL)
            .await
            .map_err(|e| StorageError::Subscription(e.to_string()))?;

        let (tx, rx) = broadcast::channel(FEED_EVENT_CAPACITY);
        *guard = Some(tx.downgrade());
        tokio::spawn(run_listener(listener, self.pool.clone(), tx));
        tracing::info!(channel = BOOKMARK_CHANGES_CHANNEL, "change feed listener started");
        Ok(rx)
    }
}

/// Owns the only strong sender; when it returns, subscriber streams end.
async fn run_listener(mut listener: PgListener, pool: PgPool, tx: broadcast::Sender<BookmarkChange>) {
    loop {
        let notification = match listener.recv().await {
            Ok(notification) => notification,
            Err(e) => {
                tracing::warn!(error = %e, "change feed listener stopped");
                break;
            },
        };
        let notice = match parse_feed_payload(notification.payload()) {
            Ok(notice) => notice,
            Err(e) => {
                tracing::warn!(error = %e, "dropping malformed change notification");
                continue;
            },
        };
        match resolve_notice(&pool, notice).await {
            Ok(Some(change)) => {
                // No receivers is fine: nobody is watching right now.
                let _ = tx.send(change);
            },
            Ok(None) => tracing::debug!(?notice, "inserted row already gone"),
            // Poll picks the row up on its next tick.
            Err(e) => tracing::warn!(error = %e, ?notice, "failed to load notified row"),
        }
    }
}

#[async_trait]
impl ChangeFeed for PgStorage {
    async fn subscribe(&self, owner: UserId) -> Result<ChangeStream, StorageError> {
        let rx = self.feed_receiver().await?;
        Ok(owner_stream(rx, owner))
    }
}
