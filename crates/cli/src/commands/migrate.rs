//! Applies the PostgreSQL schema: bookmarks table, owner index, and the
//! change-notification trigger. Idempotent.

use anyhow::Result;
use smartmark_storage::run_pg_migrations;
use sqlx::postgres::PgPoolOptions;

use crate::config::Config;

pub(crate) async fn run(config: &Config) -> Result<()> {
    let url = config.require_database_url()?;
    let pool = PgPoolOptions::new().max_connections(1).connect(url).await?;
    run_pg_migrations(&pool).await?;
    pool.close().await;
    println!("Migrations applied");
    Ok(())
}
