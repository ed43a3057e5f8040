//! Error taxonomy for todo operations.
//!
//! # Design
//! `NotFound` gets a dedicated variant because the HTTP layer maps "the store
//! matched zero rows" to 404 while every other store failure becomes a 500.
//! Callers tell the kinds apart with a plain `match`.

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TodoError {
    /// A required field is missing or invalid. Raised before the store is touched.
    #[error("validation failed: {0}")]
    Validation(&'static str),

    /// The store accepted the statement but no row matched `id`.
    #[error("todo {id} not found (at {at})")]
    NotFound { id: i64, at: DateTime<Utc> },

    /// Connection, statement, execution or decode failure from the store.
    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),
}

impl TodoError {
    pub(crate) fn not_found(id: i64) -> Self {
        TodoError::NotFound { id, at: Utc::now() }
    }
}

pub type Result<T> = std::result::Result<T, TodoError>;
