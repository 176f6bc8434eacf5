//! Logging utilities for the module host
//!
//! Simple logging initialization that:
//! - Respects RUST_LOG environment variable
//! - Allows configuration via config file
//! - Optionally emits JSON lines (`json-logging` feature)
//!
//! # Usage
//!
//! ```rust,no_run
//! use micfx_core::utils::init_logging;
//!
//! init_logging(None); // Uses RUST_LOG or defaults to "info"
//! ```

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Resolve the effective filter: RUST_LOG, then the config filter, then "info"
fn build_filter(filter: Option<&str>) -> EnvFilter {
    if std::env::var("RUST_LOG").is_ok() {
        return EnvFilter::from_default_env();
    }
    EnvFilter::new(filter.unwrap_or("info"))
}

/// Initialize human-readable logging for the host
///
/// # Arguments
/// * `filter` - Optional log filter from config (e.g., "info", "micfx_core::module=debug").
///   RUST_LOG always takes precedence.
pub fn init_logging(filter: Option<&str>) {
    // try_init: a second initialisation (tests, embedding hosts) is a no-op
    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_ansi(std::env::var("NO_COLOR").is_err()),
        )
        .with(build_filter(filter))
        .try_init();
}

/// Initialize logging with JSON output (for production/monitoring)
#[cfg(feature = "json-logging")]
pub fn init_json_logging(filter: Option<&str>) {
    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .json()
                .with_target(true)
                .with_current_span(true)
                .with_span_list(true),
        )
        .with(build_filter(filter))
        .try_init();
}

/// Initialize logging from the host's [`crate::config::LoggingConfig`]
pub fn init_logging_from_config(config: Option<&crate::config::LoggingConfig>) {
    let filter = config.and_then(|c| c.filter.as_deref());

    if config.is_some_and(|c| c.json_format) {
        #[cfg(feature = "json-logging")]
        {
            init_json_logging(filter);
        }
        #[cfg(not(feature = "json-logging"))]
        {
            // Fall back to regular logging if json-logging feature not enabled
            init_logging(filter);
        }
    } else {
        init_logging(filter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoggingConfig;

    #[test]
    fn test_repeated_initialization_is_harmless() {
        let config = LoggingConfig {
            filter: Some("debug".to_string()),
            json_format: false,
        };
        init_logging_from_config(Some(&config));
        init_logging(None);
    }
}
