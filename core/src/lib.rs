//! Persistence core for the todo service.
//!
//! # Overview
//! Owns the todo item lifecycle: create, cursor-paginated read, update and
//! delete against a SQLite store through `sqlx`. Knows nothing about HTTP;
//! the server crate adapts requests onto `TodoService` and maps `TodoError`
//! kinds onto status codes.
//!
//! # Design
//! - `TodoService` is stateless apart from an injected `SqlitePool`, so it is
//!   cheap to clone into every request.
//! - Ids and timestamps are assigned by the store. Ids come from
//!   `AUTOINCREMENT` and are never reused, which keeps the descending cursor
//!   walk stable across deletes.
//! - Every store call is an awaited future; dropping the caller's future
//!   abandons the in-flight statement.

pub mod db;
pub mod error;
pub mod service;
pub mod types;

pub use error::{Result, TodoError};
pub use service::{TodoService, DELETE_CHUNK};
pub use types::{validate_subject, Todo, DEFAULT_PAGE_SIZE};
