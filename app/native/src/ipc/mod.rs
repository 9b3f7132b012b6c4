//! TCP command channel between `wintile client` and a running `wintile server`.
//!
//! # Architecture
//!
//! - The server binds one localhost port and writes it to the port file
//! - A listener task accepts connections and hands each to its own task,
//!   which authenticates it with a pre-shared key and enqueues the single
//!   message it carries
//! - A dedicated consumer thread drains the queue in order and tiles the
//!   focused window for every recognised direction
//! - The stop message ends the listener; the consumer finishes what is
//!   already queued and the server returns
//!
//! See [`protocol`] for the frame layout and handshake.

pub mod client;
pub mod port;
pub mod protocol;
pub mod server;

use std::path::PathBuf;

pub use client::{send, send_direction, send_stop};
pub use port::{read_port_file, resolve_client_port, write_port_file};
pub use server::{ConsumerStats, Server};
use thiserror::Error;

/// Port used when neither the command line nor the config names one.
pub const DEFAULT_PORT: u16 = 6293;

/// Message that shuts the server down instead of being queued.
pub const STOP_MESSAGE: &str = "wintile-stop";

/// Pre-shared key for the handshake. It keeps unrelated local programs from
/// talking to the server by accident; it is not a security boundary.
pub const AUTH_KEY: &[u8] = b"wintile";

/// Largest frame either side accepts.
pub const MAX_FRAME_LEN: usize = 64 * 1024;

/// Errors raised by the command channel.
#[derive(Debug, Error)]
pub enum IpcError {
    /// The server could not bind its port.
    #[error("failed to bind port {port}: {source}")]
    Bind {
        port: u16,
        #[source]
        source: std::io::Error,
    },

    /// The client could not reach the server for a reason other than it being absent.
    #[error("failed to connect to server: {0}")]
    ConnectionFailed(String),

    /// Nothing is listening on the port.
    #[error("wintile server is not running on port {0}")]
    ServerNotRunning(u16),

    /// The peer did not prove knowledge of the shared key.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The peer sent something that does not follow the protocol.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// The port file could not be read or written.
    #[error("port file {}: {reason}", path.display())]
    PortFile { path: PathBuf, reason: String },

    /// The consumer thread is gone or could not be started.
    #[error("command consumer failed: {0}")]
    Consumer(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for command channel operations.
pub type IpcResult<T> = Result<T, IpcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_port() {
        assert_eq!(DEFAULT_PORT, 6293);
    }

    #[test]
    fn test_error_display() {
        let err = IpcError::ServerNotRunning(6293);
        assert_eq!(err.to_string(), "wintile server is not running on port 6293");

        let err = IpcError::PortFile {
            path: PathBuf::from("/tmp/wintile_port"),
            reason: "not a number".to_string(),
        };
        assert_eq!(err.to_string(), "port file /tmp/wintile_port: not a number");
    }

    #[test]
    fn test_bind_error_keeps_source() {
        let err = IpcError::Bind {
            port: 80,
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("port 80"));
    }
}
