//! PostgreSQL schema migrations for smartmark storage.

use anyhow::Result;
use sqlx::PgPool;

/// Run all PostgreSQL migrations. Idempotent.
pub async fn run_pg_migrations(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bookmarks (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            user_id UUID NOT NULL,
            url TEXT NOT NULL,
            title TEXT NOT NULL CHECK (length(btrim(title)) > 0),
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_bookmarks_owner_created ON bookmarks (user_id, created_at DESC)",
    )
    .execute(pool)
    .await?;

    // Change feed: one NOTIFY per inserted or deleted row. Payloads carry keys
    // only; NOTIFY rejects anything over 8000 bytes and would abort the write.
    sqlx::query(
        r#"
        CREATE OR REPLACE FUNCTION notify_bookmark_change() RETURNS trigger AS $$
        BEGIN
            IF TG_OP = 'INSERT' THEN
                PERFORM pg_notify(
                    'bookmark_changes',
                    json_build_object(
                        'type', 'INSERT',
                        'record', json_build_object('id', NEW.id, 'user_id', NEW.user_id)
                    )::text
                );
                RETURN NEW;
            ELSIF TG_OP = 'DELETE' THEN
                PERFORM pg_notify(
                    'bookmark_changes',
                    json_build_object(
                        'type', 'DELETE',
                        'old_record', json_build_object('id', OLD.id, 'user_id', OLD.user_id)
                    )::text
                );
                RETURN OLD;
            END IF;
            RETURN NULL;
        END;
        $$ LANGUAGE plpgsql
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("DROP TRIGGER IF EXISTS bookmarks_notify ON bookmarks").execute(pool).await?;

    sqlx::query(
        r#"
        CREATE TRIGGER bookmarks_notify
            AFTER INSERT OR DELETE ON bookmarks
            FOR EACH ROW EXECUTE FUNCTION notify_bookmark_change()
        "#,
    )
    .execute(pool)
    .await?;

    tracing::debug!("PostgreSQL migrations applied");
    Ok(())
}
