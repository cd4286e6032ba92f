//! Tracing subscriber setup for the `cmdline` binary
//!
//! The library only emits events; installing a subscriber is left to the
//! host application.

use tracing_subscriber::{fmt, EnvFilter};
use crate::cli::LogFormat;

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level is `warn`, or `debug` with
/// `verbose`. Logs go to stderr so stdout stays clean for handler output.
pub fn init_logging(format: LogFormat, verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    // A subscriber may already be installed when embedded; keep the existing one.
    let _ = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
