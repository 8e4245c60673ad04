//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over `server.log_level`. Production emits JSON lines,
/// other environments a human-readable format.
pub fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&server.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    // try_init: a subscriber may already be installed (tests)
    if server.is_production() {
        let _ = builder.json().try_init();
    } else {
        let _ = builder.try_init();
    }
}
