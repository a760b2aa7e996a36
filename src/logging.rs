use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVE: &str = "coffee_price_uploader_lib=info";

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` overrides the default filter. Calling this again after a
/// subscriber is installed does nothing.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
