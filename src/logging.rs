use tracing::{debug, dispatcher};
use tracing_subscriber::{EnvFilter, prelude::*};

/// Installs a stderr `fmt` subscriber. `RUST_LOG` wins over `default_level`.
///
/// Calling it again after a subscriber is installed does nothing.
pub fn init_logging(default_level: &str) {
    if dispatcher::has_been_set() {
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    if let Err(err) = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
    {
        // Lost a race with another initializer; its subscriber gets this.
        debug!("logging already initialized: {err}");
    }
}
