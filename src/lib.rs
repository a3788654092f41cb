pub mod commands;
pub mod config;
pub mod describe;
pub mod errors;
pub mod host;
pub mod reviewer;
pub mod scene;

/// Installs the global `tracing` subscriber. Honors `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
