//! Connection string parsing and redaction.
//!
//! Accepts either a `postgres://` URL or `Key=Value;` pairs
//! (`Host=db;Port=5432;Database=todos;Username=app;Password=...`).

use crate::error::ConfigError;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::str::FromStr;

/// Replacement text for secret values in logs.
pub const MASK: &str = "***MASKED***";

/// Keys whose values must never be logged.
pub fn is_secret_key(key: &str) -> bool {
    let k = key.to_ascii_lowercase();
    k.contains("password") || k.contains("secret")
}

fn is_url(s: &str) -> bool {
    let lower = s.to_ascii_lowercase();
    lower.starts_with("postgres://") || lower.starts_with("postgresql://")
}

fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(|c| c.to_lowercase())
        .collect()
}

fn invalid(message: String) -> ConfigError {
    ConfigError::InvalidConnectionString(message)
}

fn parse_ssl_mode(value: &str) -> Result<PgSslMode, ConfigError> {
    Ok(match normalize_key(value).as_str() {
        "disable" => PgSslMode::Disable,
        "allow" => PgSslMode::Allow,
        "prefer" => PgSslMode::Prefer,
        "require" => PgSslMode::Require,
        "verifyca" => PgSslMode::VerifyCa,
        "verifyfull" => PgSslMode::VerifyFull,
        _ => return Err(invalid(format!("unknown SSL mode '{}'", value))),
    })
}

/// Parse a connection string into connect options. Does no network I/O.
pub fn parse_connection_string(s: &str) -> Result<PgConnectOptions, ConfigError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ConfigError::MissingConnectionString);
    }
    if is_url(s) {
        return PgConnectOptions::from_str(s).map_err(|e| invalid(e.to_string()));
    }

    let mut opts = PgConnectOptions::new();
    for part in s.split(';').map(str::trim).filter(|p| !p.is_empty()) {
        let (key, value) = part
            .split_once('=')
            .ok_or_else(|| invalid(format!("expected Key=Value, got '{}'", part)))?;
        let value = value.trim();
        opts = match normalize_key(key).as_str() {
            "host" | "server" => opts.host(value),
            "port" => {
                let port: u16 = value
                    .parse()
                    .map_err(|_| invalid(format!("invalid port '{}'", value)))?;
                opts.port(port)
            }
            "database" | "initialcatalog" => opts.database(value),
            "username" | "userid" | "user" | "uid" => opts.username(value),
            "password" | "pwd" => opts.password(value),
            "sslmode" => opts.ssl_mode(parse_ssl_mode(value)?),
            "applicationname" => opts.application_name(value),
            _ => {
                tracing::warn!(key = %key.trim(), "ignoring unsupported connection string key");
                opts
            }
        };
    }
    Ok(opts)
}

/// Connection string with its password replaced by [`MASK`]; safe to log.
pub fn mask_connection_string(s: &str) -> String {
    if is_url(s.trim()) {
        mask_url(s)
    } else {
        s.split(';')
            .map(|part| match part.split_once('=') {
                Some((key, _)) if is_secret_key(key) || normalize_key(key) == "pwd" => {
                    format!("{}={}", key, MASK)
                }
                _ => part.to_string(),
            })
            .collect::<Vec<_>>()
            .join(";")
    }
}

fn mask_url(s: &str) -> String {
    let Some(scheme_end) = s.find("://") else {
        return s.to_string();
    };
    let (scheme, rest) = s.split_at(scheme_end + 3);

    // Passwords may hold unencoded '/', '?' or '@', so userinfo runs to the last '@'.
    let (userinfo, after) = match rest.rfind('@') {
        Some(at) => {
            let userinfo = &rest[..at];
            let masked = match userinfo.split_once(':') {
                Some((user, _)) => format!("{}:{}@", user, MASK),
                None => format!("{}@", userinfo),
            };
            (masked, &rest[at + 1..])
        }
        None => (String::new(), rest),
    };

    let after = match after.split_once('?') {
        Some((path, query)) => {
            let query = query
                .split('&')
                .map(|pair| match pair.split_once('=') {
                    Some((k, _)) if is_secret_key(k) => format!("{}={}", k, MASK),
                    _ => pair.to_string(),
                })
                .collect::<Vec<_>>()
                .join("&");
            format!("{}?{}", path, query)
        }
        None => after.to_string(),
    };

    format!("{}{}{}", scheme, userinfo, after)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_url_form() {
        let opts = parse_connection_string("postgres://app:pw@db.internal:6543/todos").unwrap();
        assert_eq!(opts.get_host(), "db.internal");
        assert_eq!(opts.get_port(), 6543);
        assert_eq!(opts.get_username(), "app");
        assert_eq!(opts.get_database(), Some("todos"));
    }

    #[test]
    fn parses_key_value_form() {
        let opts = parse_connection_string(
            "Host=db.internal; Port=6543; Database=todos; User Id=app; Password=pw; SSL Mode=Require",
        )
        .unwrap();
        assert_eq!(opts.get_host(), "db.internal");
        assert_eq!(opts.get_port(), 6543);
        assert_eq!(opts.get_username(), "app");
        assert_eq!(opts.get_database(), Some("todos"));
        assert!(matches!(opts.get_ssl_mode(), PgSslMode::Require));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            parse_connection_string("not a connection string"),
            Err(ConfigError::InvalidConnectionString(_))
        ));
        assert!(matches!(
            parse_connection_string("Host=db;Port=abc"),
            Err(ConfigError::InvalidConnectionString(_))
        ));
        assert!(matches!(
            parse_connection_string("Host=db;SSL Mode=sometimes"),
            Err(ConfigError::InvalidConnectionString(_))
        ));
    }

    #[test]
    fn empty_is_missing() {
        assert!(matches!(
            parse_connection_string("  "),
            Err(ConfigError::MissingConnectionString)
        ));
    }

    #[test]
    fn masks_key_value_password() {
        assert_eq!(
            mask_connection_string("Host=db;Username=app;Password=hunter2;Database=todos"),
            "Host=db;Username=app;Password=***MASKED***;Database=todos"
        );
        assert_eq!(mask_connection_string("Server=db;Pwd=x"), "Server=db;Pwd=***MASKED***");
    }

    #[test]
    fn masks_url_password() {
        assert_eq!(
            mask_connection_string("postgres://app:hunter2@db:5432/todos?sslmode=require"),
            "postgres://app:***MASKED***@db:5432/todos?sslmode=require"
        );
        assert_eq!(
            mask_connection_string("postgresql://db/todos?user=app&password=hunter2"),
            "postgresql://db/todos?user=app&password=***MASKED***"
        );
    }

    #[test]
    fn masks_url_password_with_reserved_characters() {
        for url in [
            "postgres://app:pa/ss@db/todos",
            "postgres://app:pa?ss@db/todos",
            "postgres://app:p@ss@db/todos",
        ] {
            assert_eq!(
                mask_connection_string(url),
                "postgres://app:***MASKED***@db/todos",
                "{}",
                url
            );
        }
    }

    #[test]
    fn url_without_password_is_unchanged() {
        assert_eq!(
            mask_connection_string("postgres://app@db/todos"),
            "postgres://app@db/todos"
        );
    }

    #[test]
    fn secret_keys_are_case_insensitive() {
        assert!(is_secret_key("Database:PASSWORD"));
        assert!(is_secret_key("Jwt:Secret"));
        assert!(!is_secret_key("ConnectionStrings:DefaultConnection"));
    }
}
