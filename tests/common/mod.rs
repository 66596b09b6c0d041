#![allow(dead_code)]

use async_trait::async_trait;
use axum::http::{self, Request};
use http_body_util::BodyExt;
use std::sync::Mutex;
use todo_api::{AppError, NewTodoItem, TodoItem, TodoStore};

/// In-memory store; ids start at 1 and increase like an identity column.
#[derive(Default)]
pub struct MemoryTodoStore {
    items: Mutex<Vec<TodoItem>>,
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    async fn list_all(&self) -> Result<Vec<TodoItem>, AppError> {
        Ok(self.items.lock().unwrap().clone())
    }

    async fn insert(&self, item: &NewTodoItem) -> Result<TodoItem, AppError> {
        let mut items = self.items.lock().unwrap();
        let created = TodoItem {
            id: items.len() as i64 + 1,
            title: item.title.clone(),
            is_completed: item.is_completed,
        };
        items.push(created.clone());
        Ok(created)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Store whose database is gone.
pub struct UnavailableStore;

#[async_trait]
impl TodoStore for UnavailableStore {
    async fn list_all(&self) -> Result<Vec<TodoItem>, AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }

    async fn insert(&self, _item: &NewTodoItem) -> Result<TodoItem, AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }
}

pub async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

pub fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}
