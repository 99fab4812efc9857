//! Tracing subscriber set-up for the CLI binary.

use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "MODLAUNCHER_LOG";

/// Install the global fmt subscriber.
///
/// Filter precedence: `MODLAUNCHER_LOG`, then `RUST_LOG`, then `info`
/// (or `debug` when `verbose` is set).
pub fn init(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = if verbose {
        EnvFilter::new(fallback)
    } else {
        EnvFilter::try_from_env(LOG_ENV)
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new(fallback))
    };

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}
