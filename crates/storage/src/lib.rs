//! Storage layer for smartmark
//!
//! Owner-scoped bookmark persistence plus a change feed, behind the
//! [`BookmarkStore`] and [`ChangeFeed`] traits. PostgreSQL is the production
//! backend; [`MemoryStorage`] serves development mode and tests.

mod backend;
mod error;
mod fanout;
mod memory;
mod pg_migrations;
mod pg_storage;
pub mod traits;

pub use backend::StorageBackend;
pub use error::StorageError;
pub use memory::MemoryStorage;
pub use pg_migrations::run_pg_migrations;
pub use pg_storage::{FeedNotice, PgStorage, parse_feed_payload};
pub use traits::{BookmarkStore, ChangeFeed, ChangeStream};
