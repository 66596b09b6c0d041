//! TodoService: validation and normalization in front of the store.

mod todo;
mod validation;
pub use todo::TodoService;
pub use validation::{TodoValidator, TITLE_MAX_LENGTH};
