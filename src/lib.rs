//! Todo API: list and create todo items over HTTP, stored in PostgreSQL.

pub mod config;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod openapi;
pub mod routes;
pub mod service;
pub mod startup;
pub mod state;
pub mod store;
pub mod telemetry;
pub mod todo;

pub use config::Settings;
pub use error::{AppError, ConfigError, StartupError};
pub use migration::{apply_migrations, MigrationReport};
pub use routes::router;
pub use service::TodoService;
pub use startup::{connect, run};
pub use state::AppState;
pub use store::{PgTodoStore, TodoStore};
pub use telemetry::init_tracing;
pub use todo::{NewTodoItem, TodoItem};
