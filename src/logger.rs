use tracing_subscriber::EnvFilter;

/// Error returned when a global subscriber is already installed.
pub type InitError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Install a `tracing` subscriber for the benchmark binary.
///
/// Output goes to stderr so that stdout carries only the result lines.
/// Defaults to `warn`; set `RUST_LOG=info` (or `debug` for per-worker
/// output) to see run phases.
pub fn try_init() -> Result<(), InitError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_thread_names(true)
        .try_init()
}
