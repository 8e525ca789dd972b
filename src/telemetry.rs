use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// Verbosity comes from `RUST_LOG` when set (e.g. `RUST_LOG=storefront_rs=debug`),
/// otherwise from `default_filter`. Output goes to stderr so it never mixes
/// with rendered tables or prompts.
pub fn setup_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
