//! CLI module for wintile.
//!
//! The same binary runs the server and the clients that talk to it. Logging
//! is configured here, once, before any command runs.

mod commands;

use clap::Parser;
pub use commands::Cli;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::error::WintileError;

/// Runs the CLI.
///
/// Parses command-line arguments and executes the appropriate command.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn run() -> Result<(), WintileError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    cli.execute()
}

/// Filter directive used when `RUST_LOG` is not set.
#[must_use]
pub const fn default_log_directive(verbose: bool) -> &'static str {
    if verbose { "wintile=debug" } else { "wintile=info" }
}

/// Installs the global tracing subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence over `verbose`. Calling this more than once
/// has no effect.
pub fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_directive(verbose)));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}
