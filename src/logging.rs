//! Env-driven tracing setup
//!
//! The library itself only emits structured events; this module is the one
//! place a binary wires them to an output. Formatting, color, and rotation
//! policy beyond the fmt defaults belong to the embedding application.

use tracing_subscriber::EnvFilter;

/// Default filter when neither `RUST_LOG` nor `LOG_LEVEL` is set
const DEFAULT_FILTER: &str = "info";

/// Install a fmt subscriber filtered from the environment
///
/// `RUST_LOG` takes precedence; `LOG_LEVEL` (e.g. `debug`) is honored as a
/// fallback for deployments configured that way. Idempotent: a second call
/// is a no-op if a global subscriber is already installed.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| {
            std::env::var("LOG_LEVEL")
                .map_err(|_| ())
                .and_then(|level| EnvFilter::try_new(level.to_lowercase()).map_err(|_| ()))
        })
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
        tracing::info!("logging initialized twice without panicking");
    }
}
