//! Store bootstrap: pool construction and schema creation.
//!
//! Timestamps are written by SQLite itself with millisecond resolution in
//! RFC 3339 form, which `chrono` decodes directly into `DateTime<Utc>`.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS todos (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    subject     TEXT    NOT NULL CHECK (subject <> ''),
    description TEXT    NOT NULL DEFAULT '',
    created_at  TEXT    NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    updated_at  TEXT    NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
)
"#;

/// Open a pool against `url`, creating the database file if it is missing.
///
/// In-memory urls ignore `max_connections` and go through
/// [`connect_in_memory`].
pub async fn connect(url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    if url.contains(":memory:") {
        return connect_in_memory().await;
    }
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// Open a single-connection in-memory pool.
///
/// Every SQLite in-memory connection is its own database, so the pool is
/// pinned to one connection that is never closed for idleness or age.
pub async fn connect_in_memory() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None::<Duration>)
        .max_lifetime(None::<Duration>)
        .connect_with(options)
        .await
}

/// Create the `todos` table if it does not exist yet.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(SCHEMA).execute(pool).await?;
    tracing::debug!("todos schema ready");
    Ok(())
}
