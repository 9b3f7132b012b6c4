//! Application-level error type returned by the CLI.

use thiserror::Error;

use crate::config::ConfigError;
use crate::ipc::IpcError;
use crate::tiling::TilingError;

/// Errors that can end a `wintile` invocation.
#[derive(Debug, Error)]
pub enum WintileError {
    /// Invalid command arguments.
    #[error("{0}")]
    InvalidArguments(String),

    #[error("Tiling error: {0}")]
    Tiling(#[from] TilingError),

    #[error("IPC error: {0}")]
    Ipc(#[from] IpcError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
