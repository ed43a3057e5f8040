//! Request handlers for `/todos` and `/healthz`.
//!
//! Each handler decodes and validates its input, calls `TodoService` at most
//! once, and turns the outcome into exactly one response. Extractor failures
//! are taken as `Result` so a bad body or query string becomes a 400 for that
//! request alone.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use todo_core::TodoService;

use crate::error::ApiError;
use crate::model::{
    CreateTodoRequest, CreateTodoResponse, DeleteTodoRequest, DeleteTodoResponse, HealthzResponse,
    ReadTodoRequest, ReadTodoResponse, UpdateTodoRequest, UpdateTodoResponse,
};

pub async fn healthz() -> Json<HealthzResponse> {
    Json(HealthzResponse {
        message: "OK".to_string(),
    })
}

pub async fn create_todo(
    State(service): State<TodoService>,
    payload: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> Result<Json<CreateTodoResponse>, ApiError> {
    let Json(req) = payload?;
    req.validate()?;

    let todo = service.create(&req.subject, &req.description).await?;
    Ok(Json(CreateTodoResponse { todo }))
}

pub async fn read_todos(
    State(service): State<TodoService>,
    params: Result<Query<ReadTodoRequest>, QueryRejection>,
) -> Result<Json<ReadTodoResponse>, ApiError> {
    let Query(req) = params?;

    let todos = service.read(req.cursor(), req.page_size()).await?;
    Ok(Json(ReadTodoResponse { todos }))
}

pub async fn update_todo(
    State(service): State<TodoService>,
    payload: Result<Json<UpdateTodoRequest>, JsonRejection>,
) -> Result<Json<UpdateTodoResponse>, ApiError> {
    let Json(req) = payload?;
    req.validate()?;

    let todo = service.update(req.id, &req.subject, &req.description).await?;
    Ok(Json(UpdateTodoResponse { todo }))
}

pub async fn delete_todos(
    State(service): State<TodoService>,
    payload: Result<Json<DeleteTodoRequest>, JsonRejection>,
) -> Result<Json<DeleteTodoResponse>, ApiError> {
    let Json(req) = payload?;

    service.delete(&req.ids).await?;
    Ok(Json(DeleteTodoResponse::default()))
}
