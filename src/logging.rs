//! Logging setup for the CLI.
//!
//! Diagnostics go to stderr so stdout stays usable by the calling pipeline.

use std::sync::OnceLock;

use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceLock<()> = OnceLock::new();

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise the level is `debug` when `verbose`
/// is set and `warn` otherwise. Subsequent calls are no-ops.
pub fn init(verbose: bool) {
    INITIALIZED.get_or_init(|| {
        let default_level = if verbose { "debug" } else { "warn" };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_level));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .try_init();
    });
}
