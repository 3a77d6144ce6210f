//! PostgreSQL storage backend using sqlx.
//!
//! Split into modular files by concern: row CRUD and the `LISTEN/NOTIFY`
//! change feed.

mod bookmarks;
mod feed;

use std::sync::Arc;

use smartmark_core::{
    BookmarkChange, PG_POOL_ACQUIRE_TIMEOUT_SECS, PG_POOL_IDLE_TIMEOUT_SECS,
    PG_POOL_MAX_CONNECTIONS,
};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tokio::sync::{Mutex, broadcast};

use crate::error::StorageError;

use super::pg_migrations::run_pg_migrations;

pub use feed::{FeedNotice, parse_feed_payload};

#[derive(Clone, Debug)]
pub struct PgStorage {
    pool: PgPool,
    /// Weak handle to the shared listener's sender; upgrading fails once the
    /// listener task has exited, which triggers a fresh connection.
    feed: Arc<Mutex<Option<broadcast::WeakSender<BookmarkChange>>>>,
}

impl PgStorage {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(PG_POOL_MAX_CONNECTIONS)
            .acquire_timeout(std::time::Duration::from_secs(PG_POOL_ACQUIRE_TIMEOUT_SECS))
            .idle_timeout(std::time::Duration::from_secs(PG_POOL_IDLE_TIMEOUT_SECS))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;
        run_pg_migrations(&pool).await.map_err(|e| StorageError::Migration(e.to_string()))?;
        tracing::info!("PgStorage initialized");
        Ok(Self::from_pool(pool))
    }

    /// Wrap an existing pool without running migrations.
    #[must_use]
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool, feed: Arc::new(Mutex::new(None)) }
    }
}

pub(crate) const BOOKMARK_COLUMNS: &str = "id, url, title, created_at, user_id";
