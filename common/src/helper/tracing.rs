use std::env;
use std::sync::Once;

use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "GRID_LOG";
const DEFAULT_LOG_LEVEL: &str = "info";

static LOG_INIT: Once = Once::new();

/// Init tracing in level specified with env 'GRID_LOG' or "info" level by default.
/// Set `RUST_LOG_FORMAT=json` for json lines.
pub fn init_default_tracing() {
    LOG_INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));
        if env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
            tracing_subscriber::fmt().with_env_filter(filter).json().init();
        } else {
            tracing_subscriber::fmt().with_env_filter(filter).init();
        }
    });
}
