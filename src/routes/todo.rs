//! Todo routes under /api/todos.

use crate::handlers::todo::{create_todo, list_todos};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn todo_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/todos", get(list_todos).post(create_todo))
        .with_state(state)
}
