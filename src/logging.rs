use tracing_subscriber::EnvFilter;

/// Installs the global fmt subscriber. The filter comes from `RUST_LOG`,
/// falling back to `default_filter` (e.g. `"info"`).
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    // A second call (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
