use tracing_subscriber::{fmt, EnvFilter};

/// Install the diagnostic subscriber.
///
/// Diagnostics go to stderr so the report on stdout stays clean. The filter
/// defaults to `warn` and can be overridden through `RUST_LOG`.
pub fn init_logging(ansi: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Only fails when a global subscriber is already set; the first one wins
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(ansi)
        .with_target(false)
        .without_time()
        .try_init();
}
