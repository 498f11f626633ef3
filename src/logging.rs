use std::io::{self, IsTerminal};

use tracing::Level;
use tracing_subscriber::filter::{EnvFilter, FilterExt, Targets, filter_fn};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Target for unreadable-file diagnostics. Events on it bypass `RUST_LOG`.
pub const READ_FAILURE_TARGET: &str = "statuslog::read_failure";

/// Initialize diagnostics on stderr, leaving stdout to the report tables.
///
/// Verbosity comes from `RUST_LOG` and defaults to `warn`. Read failures go
/// through a separate always-on layer so that every unreadable file is named
/// even with `RUST_LOG=off`.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let ansi = io::stderr().is_terminal();

    let general = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(ansi)
        .with_target(false)
        .with_filter(filter.and(filter_fn(|meta| meta.target() != READ_FAILURE_TARGET)));

    let read_failures = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(ansi)
        .with_target(false)
        .with_filter(Targets::new().with_target(READ_FAILURE_TARGET, Level::ERROR));

    tracing_subscriber::registry()
        .with(general)
        .with(read_failures)
        .init();
}
