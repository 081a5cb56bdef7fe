use std::io;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "info";

fn env_filter(filter: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter.unwrap_or(DEFAULT_FILTER)))
}

/// Install the global subscriber, compact or JSON.
/// - `RUST_LOG` wins over `filter`; `filter` wins over the `info` default
/// - Writes to stderr so rendered documents on stdout stay clean
/// - A second call is a no-op
pub fn init_logging(json: bool, filter: Option<&str>) {
    let builder = fmt().with_env_filter(env_filter(filter)).with_target(false).with_writer(io::stderr);
    let _ = if json { builder.json().try_init() } else { builder.compact().try_init() };
}

/// Compact human-readable output at `info`.
pub fn init_logging_default() {
    init_logging(false, None);
}

/// JSON structured output at `info`.
pub fn init_logging_json() {
    init_logging(true, None);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_is_harmless() {
        init_logging_default();
        init_logging_json();
        init_logging(false, Some("debug"));
        tracing::info!(event = "logging_ready");
    }
}
