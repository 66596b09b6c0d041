//! Load settings from JSON settings files and the process environment.
//!
//! Layers, later wins: `appsettings.json` (or `CONFIG_PATH`), `appsettings.{environment}.json`,
//! then environment variables. Environment keys use `__` for nesting, so
//! `ConnectionStrings__DefaultConnection` sets `ConnectionStrings:DefaultConnection`. Keys are
//! case-insensitive.

use crate::config::types::*;
use crate::error::ConfigError;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

pub const ENVIRONMENT_VAR: &str = "APP_ENVIRONMENT";
pub const CONFIG_PATH_VAR: &str = "CONFIG_PATH";
pub const DEFAULT_CONFIG_FILE: &str = "appsettings.json";

pub const CONNECTION_STRING_KEY: &str = "ConnectionStrings:DefaultConnection";
pub const DATABASE_URL_KEY: &str = "DATABASE_URL";
pub const PORT_KEY: &str = "PORT";
const MAX_CONNECTIONS_KEYS: [&str; 2] = ["Database:MaxConnections", "DB_MAX_CONNECTIONS"];

/// Flat environment variables that are part of the configuration even without a `__` separator.
const KNOWN_ENV_KEYS: &[&str] = &[
    ENVIRONMENT_VAR,
    CONFIG_PATH_VAR,
    DATABASE_URL_KEY,
    PORT_KEY,
    "DB_MAX_CONNECTIONS",
    "RUST_LOG",
];

/// Environment name from `APP_ENVIRONMENT`, default `Production`.
pub fn environment_name(env: &HashMap<String, String>) -> String {
    env.get(ENVIRONMENT_VAR)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_ENVIRONMENT)
        .to_string()
}

impl Settings {
    /// Read `.env`-populated process environment and settings files.
    pub fn load() -> Result<Self, ConfigError> {
        let env: HashMap<String, String> = std::env::vars().collect();
        let base = env
            .get(CONFIG_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        let environment = environment_name(&env);

        let mut entries = BTreeMap::new();
        read_settings_file(&base, &mut entries)?;
        read_settings_file(&environment_file(&base, &environment), &mut entries)?;
        Self::resolve(&env, entries)
    }

    /// Layer environment variables over file entries and extract typed settings.
    pub fn resolve(
        env: &HashMap<String, String>,
        mut entries: BTreeMap<String, String>,
    ) -> Result<Self, ConfigError> {
        for (key, value) in env {
            if key.contains("__") {
                insert_entry(&mut entries, key.replace("__", ":"), value.clone());
            } else if KNOWN_ENV_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key)) {
                insert_entry(&mut entries, key.clone(), value.clone());
            }
        }

        let connection_string = non_empty(&entries, CONNECTION_STRING_KEY)
            .or_else(|| non_empty(&entries, DATABASE_URL_KEY))
            .ok_or(ConfigError::MissingConnectionString)?
            .to_string();

        let port = match non_empty(&entries, PORT_KEY) {
            Some(v) => parse_value(PORT_KEY, v)?,
            None => DEFAULT_PORT,
        };

        let max_connections = match MAX_CONNECTIONS_KEYS
            .iter()
            .find_map(|k| non_empty(&entries, k).map(|v| (*k, v)))
        {
            Some((key, v)) => {
                let n: u32 = parse_value(key, v)?;
                if n == 0 {
                    return Err(ConfigError::InvalidValue {
                        key: key.to_string(),
                        value: v.to_string(),
                    });
                }
                n
            }
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Settings {
            environment: environment_name(env),
            connection_string,
            port,
            max_connections,
            entries,
        })
    }
}

/// `appsettings.json` -> `appsettings.Development.json`.
pub fn environment_file(base: &Path, environment: &str) -> PathBuf {
    let stem = base
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("appsettings");
    let name = match base.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}.{}.{}", stem, environment, ext),
        None => format!("{}.{}", stem, environment),
    };
    base.with_file_name(name)
}

/// Merge a JSON settings file into `entries`. A missing file is not an error.
pub fn read_settings_file(path: &Path, entries: &mut BTreeMap<String, String>) -> Result<(), ConfigError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "settings file not found, skipping");
        return Ok(());
    }
    let file_err = |message: String| ConfigError::File {
        path: path.display().to_string(),
        message,
    };
    let raw = std::fs::read_to_string(path).map_err(|e| file_err(e.to_string()))?;
    let value: Value = serde_json::from_str(&raw).map_err(|e| file_err(e.to_string()))?;
    if !value.is_object() {
        return Err(file_err("top level must be a JSON object".into()));
    }
    flatten("", &value, entries);
    Ok(())
}

fn flatten(prefix: &str, value: &Value, out: &mut BTreeMap<String, String>) {
    let join = |key: &str| {
        if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}:{}", prefix, key)
        }
    };
    match value {
        Value::Object(map) => {
            for (k, v) in map {
                flatten(&join(k), v, out);
            }
        }
        Value::Array(items) => {
            for (i, v) in items.iter().enumerate() {
                flatten(&join(&i.to_string()), v, out);
            }
        }
        Value::Null => insert_entry(out, prefix.to_string(), String::new()),
        Value::String(s) => insert_entry(out, prefix.to_string(), s.clone()),
        other => insert_entry(out, prefix.to_string(), other.to_string()),
    }
}

/// Keys are case-insensitive. A later write replaces the value but keeps the first spelling of the key.
fn insert_entry(entries: &mut BTreeMap<String, String>, key: String, value: String) {
    match entries.keys().find(|k| k.eq_ignore_ascii_case(&key)).cloned() {
        Some(existing) => {
            entries.insert(existing, value);
        }
        None => {
            entries.insert(key, value);
        }
    }
}

fn lookup<'a>(entries: &'a BTreeMap<String, String>, key: &str) -> Option<&'a String> {
    entries
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, v)| v)
}

fn non_empty<'a>(entries: &'a BTreeMap<String, String>, key: &str) -> Option<&'a str> {
    lookup(entries, key).map(|s| s.trim()).filter(|s| !s.is_empty())
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}
