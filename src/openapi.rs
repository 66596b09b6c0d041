//! OpenAPI document for the todo endpoints.

use crate::error::{ErrorBody, ErrorDetail};
use crate::handlers::todo;
use crate::todo::{NewTodoItem, TodoItem};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Todo API", version = "v1"),
    paths(todo::list_todos, todo::create_todo),
    components(schemas(TodoItem, NewTodoItem, ErrorBody, ErrorDetail)),
    tags((name = "todos", description = "Todo items"))
)]
pub struct ApiDoc;
