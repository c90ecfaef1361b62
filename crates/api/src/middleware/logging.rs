//! Logging initialization for the portal.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Resolve the log filter. An explicit `RUST_LOG` wins over the
/// configured level; an unparseable level falls back to `info` rather
/// than aborting startup.
fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initializes tracing output.
///
/// `logging.format = "json"` emits one structured line per event for log
/// shippers; any other value gets the compact human-readable form used
/// during development.
pub fn init_logging(config: &LoggingConfig) {
    let registry = tracing_subscriber::registry().with(env_filter(config));

    if config.format == "json" {
        registry
            .with(
                fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(true)
                    .with_target(true),
            )
            .init();
    } else {
        registry
            .with(fmt::layer().compact().with_target(true))
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_level(level: &str) -> LoggingConfig {
        LoggingConfig {
            level: level.to_string(),
            format: "pretty".to_string(),
        }
    }

    #[test]
    fn test_env_filter_uses_configured_level() {
        std::env::remove_var("RUST_LOG");
        let filter = env_filter(&config_with_level("debug"));
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn test_env_filter_accepts_directives() {
        std::env::remove_var("RUST_LOG");
        let filter = env_filter(&config_with_level("info,sqlx=warn"));
        let rendered = filter.to_string();
        assert!(rendered.contains("sqlx=warn"), "got: {}", rendered);
    }

    #[test]
    fn test_env_filter_falls_back_on_garbage() {
        std::env::remove_var("RUST_LOG");
        let filter = env_filter(&config_with_level("===not a level==="));
        assert_eq!(filter.to_string(), "info");
    }
}
