//! Todo item types shared by the store, service and handlers.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A persisted todo item. `id` is assigned by the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: i64,
    pub title: String,
    pub is_completed: bool,
}

/// Create request body. Unknown fields, including a client-supplied `id`, are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewTodoItem {
    pub title: String,
    #[serde(default)]
    pub is_completed: bool,
}
