//! Request validation for todo create bodies.

use crate::error::AppError;
use crate::todo::NewTodoItem;

/// Longest accepted title, in characters.
pub const TITLE_MAX_LENGTH: usize = 200;

pub struct TodoValidator;

impl TodoValidator {
    /// Validate a create body. Expects an already trimmed title.
    pub fn validate(item: &NewTodoItem) -> Result<(), AppError> {
        validate_title(&item.title)
    }
}

fn validate_title(title: &str) -> Result<(), AppError> {
    if title.is_empty() {
        return Err(AppError::Validation("title is required".into()));
    }
    let len = title.chars().count();
    if len > TITLE_MAX_LENGTH {
        return Err(AppError::Validation(format!(
            "title must be at most {} characters",
            TITLE_MAX_LENGTH
        )));
    }
    Ok(())
}
