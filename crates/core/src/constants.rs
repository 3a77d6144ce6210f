//! Shared constants for smartmark.

/// Seconds between full-list polls of a live view.
pub const POLL_INTERVAL_SECS: u64 = 3;

/// Capacity of the in-process broadcast channel carrying local optimistic changes.
pub const LOCAL_EVENT_CAPACITY: usize = 256;

/// Capacity of a single change-feed subscription buffer.
pub const FEED_EVENT_CAPACITY: usize = 256;

/// PostgreSQL connection pool: maximum connections.
pub const PG_POOL_MAX_CONNECTIONS: u32 = 10;

/// PostgreSQL connection pool: acquire timeout in seconds.
pub const PG_POOL_ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// PostgreSQL connection pool: idle timeout in seconds.
pub const PG_POOL_IDLE_TIMEOUT_SECS: u64 = 300;

/// Postgres `NOTIFY` channel carrying bookmark inserts and deletes.
pub const BOOKMARK_CHANGES_CHANNEL: &str = "bookmark_changes";

/// Third-party favicon-by-domain service.
pub const FAVICON_SERVICE_URL: &str = "https://www.google.com/s2/favicons";

/// OAuth provider used when none is configured.
pub const DEFAULT_OAUTH_PROVIDER: &str = "google";

/// Login redirect target after a failed OAuth callback.
pub const AUTH_FAILED_REDIRECT: &str = "/login?error=auth_failed";
