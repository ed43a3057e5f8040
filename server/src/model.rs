//! Wire DTOs for the `/todos` and `/healthz` endpoints.
//!
//! # Design
//! Request fields default to their zero values when absent, so a body that
//! omits `subject` fails validation (400) the same way an empty subject does,
//! rather than failing to decode.

use serde::{Deserialize, Deserializer, Serialize};
use todo_core::{validate_subject, Todo, TodoError, DEFAULT_PAGE_SIZE};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthzResponse {
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTodoRequest {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub description: String,
}

impl CreateTodoRequest {
    pub fn validate(&self) -> Result<(), TodoError> {
        validate_subject(&self.subject)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodoResponse {
    pub todo: Todo,
}

/// Query parameters of the read flow. An empty value (`?size=`) counts as
/// absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReadTodoRequest {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub prev_id: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub size: Option<i64>,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.as_deref() {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

impl ReadTodoRequest {
    /// Cursor id; `0` means "start from the newest item".
    pub fn cursor(&self) -> i64 {
        self.prev_id.unwrap_or(0)
    }

    pub fn page_size(&self) -> i64 {
        self.size.unwrap_or(DEFAULT_PAGE_SIZE)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadTodoResponse {
    pub todos: Vec<Todo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTodoRequest {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub description: String,
}

impl UpdateTodoRequest {
    pub fn validate(&self) -> Result<(), TodoError> {
        if self.id == 0 {
            return Err(TodoError::Validation("id must be set"));
        }
        validate_subject(&self.subject)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTodoResponse {
    pub todo: Todo,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteTodoRequest {
    #[serde(default)]
    pub ids: Vec<i64>,
}

/// Always serializes as `{}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteTodoResponse {}
