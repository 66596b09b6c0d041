//! Settings: JSON files and environment layered into [`Settings`], plus connection-string handling.

pub mod types;
pub mod loader;
pub mod connection;

pub use types::*;
pub use loader::*;
pub use connection::{is_secret_key, mask_connection_string, parse_connection_string, MASK};
