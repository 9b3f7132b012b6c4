//! Error types for the tiling pipeline.
//!
//! Every variant is recoverable at the command level: the consumer logs the
//! error and moves on to the next queued command.

use thiserror::Error;

/// Result type alias for tiling operations.
pub type TilingResult<T> = Result<T, TilingError>;

/// Errors that can occur while tiling the focused window.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TilingError {
    /// No window currently has focus.
    #[error("no focused window")]
    NoFocusedWindow,

    /// The display server reported no monitors.
    #[error("no monitors detected")]
    NoMonitors,

    /// A query or request to the display server failed.
    #[error("display backend error: {0}")]
    Backend(String),
}

impl TilingError {
    /// Creates a backend error with the given message.
    #[must_use]
    pub fn backend(message: impl Into<String>) -> Self { Self::Backend(message.into()) }
}
