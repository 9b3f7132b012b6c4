//! Blocking client used by the `client` and `stop` commands.

use std::io::{ErrorKind, Read};
use std::net::{Ipv4Addr, SocketAddr, TcpStream};
use std::time::Duration;

use super::protocol::{self, ACK, Envelope, WELCOME};
use super::{AUTH_KEY, IpcError, IpcResult, STOP_MESSAGE};
use crate::tiling::Direction;

/// Sends one message to the server on `port`.
///
/// `timeout` bounds the connect and every read and write. A server that
/// closes the connection without acknowledging is assumed to have received
/// the message.
///
/// # Errors
///
/// Returns [`IpcError::ServerNotRunning`] if nothing listens on the port,
/// [`IpcError::AuthenticationFailed`] if the handshake is refused, and other
/// variants for I/O or protocol failures.
pub fn send(message: &str, port: u16, timeout: Duration) -> IpcResult<()> {
    send_with_key(message, port, timeout, AUTH_KEY)
}

/// Like [`send`], signing the challenge with `key`.
///
/// # Errors
///
/// See [`send`].
pub fn send_with_key(message: &str, port: u16, timeout: Duration, key: &[u8]) -> IpcResult<()> {
    let mut stream = connect(port, timeout)?;

    let challenge = protocol::read_frame(&mut stream)?;
    protocol::write_frame(&mut stream, &protocol::sign(key, &challenge)?)?;
    if protocol::read_frame(&mut stream)? != WELCOME {
        return Err(IpcError::AuthenticationFailed);
    }

    protocol::write_frame(&mut stream, &Envelope::new(message).to_bytes()?)?;
    tracing::debug!("ipc: sent {message:?} to port {port}");

    read_ack(&mut stream)
}

/// Asks the server to tile the focused window toward `direction`.
///
/// # Errors
///
/// See [`send`].
pub fn send_direction(direction: Direction, port: u16, timeout: Duration) -> IpcResult<()> {
    send(direction.as_str(), port, timeout)
}

/// Asks the server to stop.
///
/// # Errors
///
/// See [`send`].
pub fn send_stop(port: u16, timeout: Duration) -> IpcResult<()> {
    send(STOP_MESSAGE, port, timeout)
}

fn connect(port: u16, timeout: Duration) -> IpcResult<TcpStream> {
    // Zero durations are rejected by the socket API.
    let timeout = timeout.max(Duration::from_millis(1));
    let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, port));

    let stream = TcpStream::connect_timeout(&addr, timeout).map_err(|err| {
        if err.kind() == ErrorKind::ConnectionRefused {
            IpcError::ServerNotRunning(port)
        } else {
            IpcError::ConnectionFailed(err.to_string())
        }
    })?;

    stream.set_read_timeout(Some(timeout)).ok();
    stream.set_write_timeout(Some(timeout)).ok();
    stream.set_nodelay(true).ok();
    Ok(stream)
}

fn read_ack(stream: &mut TcpStream) -> IpcResult<()> {
    let mut ack = [0u8; 1];
    match stream.read_exact(&mut ack) {
        Ok(()) if ack[0] == ACK => Ok(()),
        Ok(()) => Err(IpcError::Protocol("message was not acknowledged".to_string())),
        Err(err)
            if matches!(
                err.kind(),
                ErrorKind::WouldBlock | ErrorKind::TimedOut | ErrorKind::UnexpectedEof
            ) =>
        {
            // The message is already on the wire.
            tracing::debug!("ipc: no acknowledgement ({err}), assuming delivered");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}
