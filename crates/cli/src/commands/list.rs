use anyhow::Result;
use smartmark_core::UserId;
use smartmark_storage::{BookmarkStore, PgStorage};

use crate::config::Config;

pub(crate) async fn run(config: &Config, user: UserId) -> Result<()> {
    let storage = PgStorage::new(config.require_database_url()?).await?;
    let bookmarks = storage.list_bookmarks(user).await?;
    println!("{}", serde_json::to_string_pretty(&bookmarks)?);
    Ok(())
}
