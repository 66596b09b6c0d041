//! Persistence for todo items. [`TodoStore`] is the seam handlers depend on; [`PgTodoStore`] backs it with PostgreSQL.

use crate::error::AppError;
use crate::todo::{NewTodoItem, TodoItem};
use async_trait::async_trait;
use sqlx::PgPool;

#[async_trait]
pub trait TodoStore: Send + Sync {
    /// All items in insertion order.
    async fn list_all(&self) -> Result<Vec<TodoItem>, AppError>;

    /// Insert one item and return it with its assigned id.
    async fn insert(&self, item: &NewTodoItem) -> Result<TodoItem, AppError>;

    /// Cheap round trip used by readiness checks.
    async fn ping(&self) -> Result<(), AppError>;
}

const LIST_SQL: &str = "SELECT id, title, is_completed FROM todo_items ORDER BY id";
const INSERT_SQL: &str =
    "INSERT INTO todo_items (title, is_completed) VALUES ($1, $2) RETURNING id, title, is_completed";

#[derive(Clone)]
pub struct PgTodoStore {
    pool: PgPool,
}

impl PgTodoStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl TodoStore for PgTodoStore {
    async fn list_all(&self) -> Result<Vec<TodoItem>, AppError> {
        tracing::debug!(sql = %LIST_SQL, "query");
        let rows = sqlx::query_as::<_, TodoItem>(LIST_SQL)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn insert(&self, item: &NewTodoItem) -> Result<TodoItem, AppError> {
        tracing::debug!(sql = %INSERT_SQL, title = %item.title, is_completed = item.is_completed, "query");
        let row = sqlx::query_as::<_, TodoItem>(INSERT_SQL)
            .bind(&item.title)
            .bind(item.is_completed)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
