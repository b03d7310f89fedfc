use tracing_subscriber::EnvFilter;

/// Install the tracing formatter; library crates log through `log`, which
/// the subscriber picks up.
///
/// `RUST_LOG` wins over `-v` when set.
pub fn init(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
