//! Persistence access for todo items.
//!
//! # Design
//! `TodoService` owns nothing but a pool handle supplied by its constructor;
//! all item state lives in the store. Writes are followed by a confirmation
//! read so callers always get the store-assigned id and timestamps back. If
//! that read fails after a successful write the whole call fails, and the
//! caller cannot tell whether the write landed.

use sqlx::sqlite::SqlitePool;
use sqlx::{QueryBuilder, Sqlite};

use crate::error::{Result, TodoError};
use crate::types::{validate_subject, Todo};

const INSERT: &str = "INSERT INTO todos(subject, description) VALUES(?, ?)";
const CONFIRM: &str =
    "SELECT id, subject, description, created_at, updated_at FROM todos WHERE id = ?";
const READ: &str =
    "SELECT id, subject, description, created_at, updated_at FROM todos ORDER BY id DESC LIMIT ?";
const READ_WITH_ID: &str = "SELECT id, subject, description, created_at, updated_at FROM todos \
     WHERE id < ? ORDER BY id DESC LIMIT ?";
// updated_at moves forward by at least one millisecond even when the store
// clock has not ticked since the previous write.
const UPDATE: &str = "UPDATE todos SET subject = ?, description = ?, \
     updated_at = max(strftime('%Y-%m-%dT%H:%M:%fZ', 'now'), \
                      strftime('%Y-%m-%dT%H:%M:%fZ', updated_at, '+0.001 seconds')) \
     WHERE id = ?";

/// Ids bound per DELETE statement, well under SQLite's host-parameter limit.
pub const DELETE_CHUNK: usize = 500;

/// CRUD over the `todos` table.
#[derive(Debug, Clone)]
pub struct TodoService {
    pool: SqlitePool,
}

impl TodoService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip_all)]
    pub async fn create(&self, subject: &str, description: &str) -> Result<Todo> {
        validate_subject(subject)?;

        let result = sqlx::query(INSERT)
            .bind(subject)
            .bind(description)
            .execute(&self.pool)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "insert failed"))?;
        let id = result.last_insert_rowid();

        let todo = self.confirm(id).await?;
        tracing::debug!(id, "todo created");
        Ok(todo)
    }

    /// Read one page in descending id order.
    ///
    /// `prev_id == 0` starts from the newest item; any other value returns
    /// only items with a smaller id. A non-positive `size` yields an empty
    /// page rather than an error.
    #[tracing::instrument(skip(self))]
    pub async fn read(&self, prev_id: i64, size: i64) -> Result<Vec<Todo>> {
        let limit = size.max(0);
        let query = if prev_id == 0 {
            sqlx::query_as::<_, Todo>(READ).bind(limit)
        } else {
            sqlx::query_as::<_, Todo>(READ_WITH_ID).bind(prev_id).bind(limit)
        };

        let todos = query
            .fetch_all(&self.pool)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "read failed"))?;
        tracing::debug!(count = todos.len(), "todos read");
        Ok(todos)
    }

    #[tracing::instrument(skip(self, subject, description))]
    pub async fn update(&self, id: i64, subject: &str, description: &str) -> Result<Todo> {
        validate_subject(subject)?;

        let result = sqlx::query(UPDATE)
            .bind(subject)
            .bind(description)
            .bind(id)
            .execute(&self.pool)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "update failed"))?;

        if result.rows_affected() == 0 {
            let err = TodoError::not_found(id);
            tracing::info!(%err, "nothing to update");
            return Err(err);
        }

        self.confirm(id).await
    }

    /// Delete every listed id. Ids that do not exist are ignored.
    ///
    /// Large id lists are split into chunks of [`DELETE_CHUNK`] that run in
    /// one transaction, so the delete is all-or-nothing.
    #[tracing::instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn delete(&self, ids: &[i64]) -> Result<()> {
        if ids.is_empty() {
            return Ok(());
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "delete transaction failed to start"))?;

        let mut deleted = 0;
        for chunk in ids.chunks(DELETE_CHUNK) {
            let mut builder = QueryBuilder::<Sqlite>::new("DELETE FROM todos WHERE id IN (");
            let mut separated = builder.separated(", ");
            for id in chunk {
                separated.push_bind(*id);
            }
            separated.push_unseparated(")");

            let result = builder
                .build()
                .execute(&mut *tx)
                .await
                .inspect_err(|e| tracing::error!(error = %e, "delete failed"))?;
            deleted += result.rows_affected();
        }

        tx.commit()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "delete commit failed"))?;
        tracing::debug!(deleted, "todos deleted");
        Ok(())
    }

    async fn confirm(&self, id: i64) -> Result<Todo> {
        let todo = sqlx::query_as::<_, Todo>(CONFIRM)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .inspect_err(|e| tracing::error!(id, error = %e, "confirmation read failed"))?;
        Ok(todo)
    }
}
