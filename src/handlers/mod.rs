//! HTTP handlers for the todo endpoints.

pub mod todo;
pub use todo::*;
