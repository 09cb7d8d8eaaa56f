use tracing_subscriber::{EnvFilter, fmt};

/// Output shape for the global subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines for interactive use.
    Human,
    /// JSON lines suitable for log shippers.
    Json,
}

/// Install the global subscriber for `service_name`.
///
/// Uses the `RUST_LOG` environment variable if set, otherwise falls back
/// to `default_level` (e.g. "info", "debug", "wf_search=debug,warn").
///
/// Safe to call multiple times (e.g. in tests) -- subsequent calls are no-ops.
pub fn init(service_name: &str, format: LogFormat, default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .with_level(true);

    match format {
        LogFormat::Human => builder.try_init().ok(),
        LogFormat::Json => builder.json().try_init().ok(),
    };

    tracing::info!(service = service_name, format = ?format, "logging initialised");
}

/// Human-readable logging, the default for local runs.
pub fn init_logging(service_name: &str, default_level: &str) {
    init(service_name, LogFormat::Human, default_level);
}

/// JSON logging for shipping to a log aggregator.
pub fn init_logging_json(service_name: &str, default_level: &str) {
    init(service_name, LogFormat::Json, default_level);
}
