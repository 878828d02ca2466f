//! Tracing initialisation for the calens binary.
//!
//! Logs always go to stderr; stdout is reserved for the rendered changelog.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set. Otherwise only warnings are shown, or debug
/// output for calens itself when `verbose` is on.
pub fn init_tracing(verbose: bool) {
  let default_directive = if verbose { "calens=debug" } else { "warn" };
  let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

  tracing_subscriber::fmt()
    .with_env_filter(env_filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .try_init()
    .ok();
}
