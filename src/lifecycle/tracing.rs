/// Initializes the tracing/logging infrastructure for the application.
///
/// Structured logging via the `tracing` crate with environment-based
/// filtering: set `RUST_LOG` to control verbosity, e.g.
/// `RUST_LOG=bistro_session=debug` for payload-level detail of the state
/// machine, or `RUST_LOG=info` for lifecycle and transition events only.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}
