//! Todo use cases: list everything, create one.

use crate::error::AppError;
use crate::service::TodoValidator;
use crate::store::TodoStore;
use crate::todo::{NewTodoItem, TodoItem};

pub struct TodoService;

impl TodoService {
    pub async fn list(store: &dyn TodoStore) -> Result<Vec<TodoItem>, AppError> {
        store.list_all().await
    }

    /// Trim and validate the title, then insert. Returns the stored item.
    pub async fn create(store: &dyn TodoStore, item: NewTodoItem) -> Result<TodoItem, AppError> {
        let item = NewTodoItem {
            title: item.title.trim().to_string(),
            ..item
        };
        TodoValidator::validate(&item)?;
        let created = store.insert(&item).await?;
        tracing::info!(id = created.id, "todo item created");
        Ok(created)
    }
}
