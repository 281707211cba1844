//! # Logging
//!
//! Tracing subscriber setup.
//!
//! `RUST_LOG` wins when set; otherwise the configured `LOG_LEVEL` applies to this
//! crate and AWS SDK crates stay at `warn`.

use crate::config::ReconcilerConfig;
use tracing_subscriber::EnvFilter;

/// Build the env filter from `RUST_LOG` or the configured level
#[must_use]
pub fn env_filter(config: &ReconcilerConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(config)))
}

fn default_directive(config: &ReconcilerConfig) -> String {
    let level = config.log_level.to_lowercase();
    format!("warn,aws_resource_reconciler={level},arrctl={level}")
}

/// Install the global tracing subscriber
///
/// Returns `false` when a subscriber was already installed (e.g. by a host process or
/// another test), in which case the existing one is kept.
pub fn init_logging(config: &ReconcilerConfig) -> bool {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(std::io::stderr);

    let result = if config.log_format.eq_ignore_ascii_case("json") {
        builder.json().with_current_span(true).try_init()
    } else {
        builder.with_ansi(config.log_enable_color).try_init()
    };

    match result {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!("Tracing subscriber already initialized: {}", e);
            false
        }
    }
}
