pub use tracing::{debug, error, info, instrument, span, warn, Level};
pub use tracing_futures::Instrument;

use tracing_subscriber::EnvFilter;

pub fn init() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_writer(std::io::stderr)
    .init();
}

/// Installs the fmt subscriber with `env` as the filter, unless `RUST_LOG`
/// is already set.
pub fn init_env_override(env: &str) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env));

  #[cfg(debug_assertions)]
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .init();

  #[cfg(not(debug_assertions))]
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_ansi(false)
    .init();
}

/// Like [`init`] but does not panic when a subscriber is already installed.
/// Intended for tests, which may initialise logging more than once.
pub fn try_init_test() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_test_writer()
    .try_init()
    .ok();
}
