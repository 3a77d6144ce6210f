//! BookmarkStore implementation for PgStorage.

use async_trait::async_trait;
use smartmark_core::{Bookmark, BookmarkId, NewBookmark, UserId};

use super::{BOOKMARK_COLUMNS, PgStorage};
use crate::error::StorageError;
use crate::traits::BookmarkStore;

#[async_trait]
impl BookmarkStore for PgStorage {
    async fn list_bookmarks(&self, owner: UserId) -> Result<Vec<Bookmark>, StorageError> {
        let rows = sqlx::query_as::<_, Bookmark>(&format!(
            "SELECT {BOOKMARK_COLUMNS} FROM bookmarks
             WHERE user_id = $1
             ORDER BY created_at DESC, id ASC"
        ))
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn insert_bookmark(&self, new: &NewBookmark) -> Result<Bookmark, StorageError> {
        let row = sqlx::query_as::<_, Bookmark>(&format!(
            "INSERT INTO bookmarks (url, title, user_id)
             VALUES ($1, $2, $3)
             RETURNING {BOOKMARK_COLUMNS}"
        ))
        .bind(&new.url)
        .bind(&new.title)
        .bind(new.user_id)
        .fetch_one(&self.pool)
        .await?;
        tracing::debug!(id = %row.id, owner = %row.user_id, "bookmark inserted");
        Ok(row)
    }

    async fn delete_bookmark(&self, id: BookmarkId, owner: UserId) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM bookmarks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
