//! Wire format of the command channel.
//!
//! Every frame is a little-endian `u32` length followed by that many bytes.
//! A connection carries exactly one exchange:
//!
//! ```text
//! server -> client   challenge (32 random bytes)
//! client -> server   HMAC-SHA256(key, challenge)
//! server -> client   #WELCOME# | #FAILURE#
//! client -> server   {"message": "<text>"}
//! server -> client   ack byte: '1' queued, '0' rejected   (unframed)
//! ```

use std::io::{Read, Write};

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use super::{IpcError, IpcResult, MAX_FRAME_LEN};

type HmacSha256 = Hmac<Sha256>;

/// Length of the server challenge in bytes.
pub const CHALLENGE_LEN: usize = 32;

/// Handshake reply for a client that signed the challenge correctly.
pub const WELCOME: &[u8] = b"#WELCOME#";

/// Handshake reply for a client that did not.
pub const FAILURE: &[u8] = b"#FAILURE#";

/// Message was queued.
pub const ACK: u8 = b'1';

/// Message was rejected.
pub const NACK: u8 = b'0';

/// The single message a client sends after authenticating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub message: String,
}

impl Envelope {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self { Self { message: message.into() } }

    /// Serializes the envelope to JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns a protocol error if serialization fails.
    pub fn to_bytes(&self) -> IpcResult<Vec<u8>> {
        serde_json::to_vec(self)
            .map_err(|err| IpcError::Protocol(format!("failed to serialize message: {err}")))
    }

    /// Parses an envelope from JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns a protocol error if the bytes are not a valid envelope.
    pub fn from_bytes(bytes: &[u8]) -> IpcResult<Self> {
        serde_json::from_slice(bytes)
            .map_err(|err| IpcError::Protocol(format!("malformed message: {err}")))
    }
}

// ============================================================================
// Authentication
// ============================================================================

/// Generates a fresh random challenge.
#[must_use]
pub fn new_challenge() -> [u8; CHALLENGE_LEN] { rand::random() }

/// Signs `challenge` with `key`.
///
/// # Errors
///
/// Returns a protocol error if the key is rejected by the MAC.
pub fn sign(key: &[u8], challenge: &[u8]) -> IpcResult<Vec<u8>> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|err| IpcError::Protocol(format!("invalid key: {err}")))?;
    mac.update(challenge);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Checks that `response` is the signature of `challenge` under `key`.
/// The comparison runs in constant time.
#[must_use]
pub fn verify(key: &[u8], challenge: &[u8], response: &[u8]) -> bool {
    let Ok(mut mac) = HmacSha256::new_from_slice(key) else {
        return false;
    };
    mac.update(challenge);
    mac.verify_slice(response).is_ok()
}

// ============================================================================
// Framing
// ============================================================================

fn encoded_len(payload: &[u8]) -> IpcResult<[u8; 4]> {
    if payload.len() > MAX_FRAME_LEN {
        return Err(oversized(payload.len()));
    }
    let len = u32::try_from(payload.len()).map_err(|_| oversized(payload.len()))?;
    Ok(len.to_le_bytes())
}

fn decoded_len(prefix: [u8; 4]) -> IpcResult<usize> {
    let len = u32::from_le_bytes(prefix);
    let len = usize::try_from(len).map_err(|_| oversized(usize::MAX))?;
    if len > MAX_FRAME_LEN {
        return Err(oversized(len));
    }
    Ok(len)
}

fn oversized(len: usize) -> IpcError {
    IpcError::Protocol(format!("frame of {len} bytes exceeds the {MAX_FRAME_LEN} byte limit"))
}

/// Writes one length-prefixed frame and flushes.
///
/// # Errors
///
/// Returns an error if the payload is too large or the write fails.
pub fn write_frame<W: Write>(writer: &mut W, payload: &[u8]) -> IpcResult<()> {
    writer.write_all(&encoded_len(payload)?)?;
    writer.write_all(payload)?;
    writer.flush()?;
    Ok(())
}

/// Reads one length-prefixed frame.
///
/// # Errors
///
/// Returns an error if the announced length is too large or the read fails.
pub fn read_frame<R: Read>(reader: &mut R) -> IpcResult<Vec<u8>> {
    let mut prefix = [0u8; 4];
    reader.read_exact(&mut prefix)?;
    let mut payload = vec![0u8; decoded_len(prefix)?];
    reader.read_exact(&mut payload)?;
    Ok(payload)
}

/// Async counterpart of [`write_frame`].
///
/// # Errors
///
/// Returns an error if the payload is too large or the write fails.
pub async fn write_frame_async<W: AsyncWrite + Unpin>(
    writer: &mut W,
    payload: &[u8],
) -> IpcResult<()> {
    writer.write_all(&encoded_len(payload)?).await?;
    writer.write_all(payload).await?;
    writer.flush().await?;
    Ok(())
}

/// Async counterpart of [`read_frame`].
///
/// # Errors
///
/// Returns an error if the announced length is too large or the read fails.
pub async fn read_frame_async<R: AsyncRead + Unpin>(reader: &mut R) -> IpcResult<Vec<u8>> {
    let mut prefix = [0u8; 4];
    reader.read_exact(&mut prefix).await?;
    let mut payload = vec![0u8; decoded_len(prefix)?];
    reader.read_exact(&mut payload).await?;
    Ok(payload)
}
