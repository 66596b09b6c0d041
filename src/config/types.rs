//! Resolved application settings.

use crate::config::connection::{is_secret_key, mask_connection_string, MASK};
use std::collections::BTreeMap;

pub const DEFAULT_ENVIRONMENT: &str = "Production";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Clone, Debug)]
pub struct Settings {
    /// e.g. `Production`, `Development`. Selects `appsettings.{environment}.json`.
    pub environment: String,
    pub connection_string: String,
    pub port: u16,
    pub max_connections: u32,
    /// Flattened configuration keys (`Section:Key`) after layering, used for the startup dump.
    pub entries: BTreeMap<String, String>,
}

impl Settings {
    pub fn is_development(&self) -> bool {
        is_development(&self.environment)
    }

    /// Configuration entries with secret values masked and connection strings redacted.
    pub fn masked_entries(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .map(|(key, value)| {
                let shown = if is_secret_key(key) {
                    MASK.to_string()
                } else if is_connection_string_key(key) {
                    mask_connection_string(value)
                } else {
                    value.clone()
                };
                (key.clone(), shown)
            })
            .collect()
    }
}

pub fn is_development(environment: &str) -> bool {
    environment.eq_ignore_ascii_case("Development")
}

fn is_connection_string_key(key: &str) -> bool {
    key.to_ascii_lowercase().starts_with("connectionstrings:") || key.eq_ignore_ascii_case("DATABASE_URL")
}
