//! Tracing subscriber setup for the `riverlog` binary.

/// Default filter when `RUST_LOG` is unset: parse warnings only.
pub const DEFAULT_FILTER: &str = "warn";

/// Installs a stderr `fmt` subscriber filtered by `RUST_LOG`.
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn init_logging() {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}
