//! Typed errors and HTTP mapping.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("database connection string is not configured; set ConnectionStrings__DefaultConnection or DATABASE_URL, or add ConnectionStrings:DefaultConnection to appsettings.json")]
    MissingConnectionString,
    #[error("invalid connection string: {0}")]
    InvalidConnectionString(String),
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },
    #[error("settings file {path}: {message}")]
    File { path: String, message: String },
}

/// Fatal errors raised before the listener accepts traffic.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("database connection failed: {0}")]
    Connect(#[source] sqlx::Error),
    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error("server: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("validation: {0}")]
    Validation(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("invalid body: {}", .0.body_text())]
    Body(#[from] JsonRejection),
}

#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "validation_error", self.to_string()),
            AppError::Db(e) => {
                tracing::error!(error = %e, "database error while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "database error".to_string(),
                )
            }
            AppError::Body(rejection) => (rejection.status(), "invalid_body", self.to_string()),
        };
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };
        (status, Json(body)).into_response()
    }
}
