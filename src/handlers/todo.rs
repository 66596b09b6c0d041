//! Todo handlers: list all, create one.

use crate::error::{AppError, ErrorBody};
use crate::service::TodoService;
use crate::state::AppState;
use crate::todo::{NewTodoItem, TodoItem};
use axum::{extract::rejection::JsonRejection, extract::State, Json};

#[utoipa::path(
    get,
    path = "/api/todos",
    tag = "todos",
    responses(
        (status = 200, description = "All todo items in insertion order", body = [TodoItem]),
        (status = 500, description = "Database error", body = ErrorBody)
    )
)]
pub async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<TodoItem>>, AppError> {
    let items = TodoService::list(state.store.as_ref()).await?;
    Ok(Json(items))
}

#[utoipa::path(
    post,
    path = "/api/todos",
    tag = "todos",
    request_body = NewTodoItem,
    responses(
        (status = 200, description = "The stored item with its assigned id", body = TodoItem),
        (status = 400, description = "Malformed JSON body", body = ErrorBody),
        (status = 422, description = "Invalid or missing title", body = ErrorBody),
        (status = 500, description = "Database error", body = ErrorBody)
    )
)]
pub async fn create_todo(
    State(state): State<AppState>,
    payload: Result<Json<NewTodoItem>, JsonRejection>,
) -> Result<Json<TodoItem>, AppError> {
    let Json(body) = payload?;
    let item = TodoService::create(state.store.as_ref(), body).await?;
    Ok(Json(item))
}
