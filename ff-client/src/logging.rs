use tracing_subscriber::EnvFilter;

use crate::config::Verbosity;

/// Install the global fmt subscriber on stderr.
///
/// `RUST_LOG`, when set, overrides `verbosity`. A second call is a no-op.
pub fn init_logging(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.as_filter()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
