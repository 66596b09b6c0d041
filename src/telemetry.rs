//! Tracing subscriber setup.

use crate::config::is_development;
use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber. `RUST_LOG` wins over the environment-based default.
/// Calling this twice is harmless; the second call is ignored.
pub fn init_tracing(environment: &str) {
    let default_directives = if is_development(environment) {
        "todo_api=debug,tower_http=debug,sqlx=info"
    } else {
        "todo_api=info,tower_http=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
