//! Domain types for the todo store.
//!
//! # Design
//! `Todo` is both the row shape read back from the store and the JSON shape
//! sent over the wire, so it derives `sqlx::FromRow` alongside serde. Every
//! field except `subject` and `description` is assigned by the store and
//! never supplied by a caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TodoError;

/// Page size used by the read flow when the caller does not supply one.
pub const DEFAULT_PAGE_SIZE: i64 = 3;

/// A persisted todo item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Todo {
    pub id: i64,
    pub subject: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Reject an empty subject before any store access.
pub fn validate_subject(subject: &str) -> Result<(), TodoError> {
    if subject.is_empty() {
        return Err(TodoError::Validation("subject must not be empty"));
    }
    Ok(())
}
