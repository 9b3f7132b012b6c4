//! Command server.
//!
//! The listener accepts connections and runs each exchange in its own task,
//! so a slow or silent peer only ever holds up itself. Every authenticated
//! message is pushed onto an unbounded queue the moment it is read. One
//! consumer thread owns the display backend and drains the queue in arrival
//! order, so window mutations never interleave.
//!
//! A stop message is reported back to the listener, which stops accepting.
//! The consumer exits once the queue is empty and every exchange still in
//! flight has finished.

use std::net::{Ipv4Addr, SocketAddr};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use super::protocol::{self, ACK, Envelope, FAILURE, NACK, WELCOME};
use super::{AUTH_KEY, IpcError, IpcResult, STOP_MESSAGE};
use crate::platform::thread::spawn_named_thread;
use crate::tiling::{self, Direction, DisplayBackend, MoveOutcome};

/// How long a single client may take to complete its exchange.
const CONNECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Counters reported by the consumer when the server shuts down.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ConsumerStats {
    /// Commands that moved the focused window.
    pub moved: usize,
    /// Commands that left the window where it was.
    pub unchanged: usize,
    /// Commands whose pipeline returned an error or panicked.
    pub failed: usize,
    /// Messages that were not a direction.
    pub ignored: usize,
}

impl ConsumerStats {
    /// Total number of messages taken off the queue.
    #[must_use]
    pub const fn processed(&self) -> usize {
        self.moved + self.unchanged + self.failed + self.ignored
    }
}

/// What one exchange produced.
enum Received {
    Queued,
    Stop,
}

/// A bound, not yet running, command server.
#[derive(Debug)]
pub struct Server {
    listener: TcpListener,
    port: u16,
    key: Vec<u8>,
}

impl Server {
    /// Binds `127.0.0.1:port`. Port `0` lets the OS pick a free port; read it
    /// back with [`Server::port`].
    ///
    /// # Errors
    ///
    /// Returns [`IpcError::Bind`] if the port cannot be bound.
    pub async fn bind(port: u16) -> IpcResult<Self> {
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, port))
            .await
            .map_err(|source| IpcError::Bind { port, source })?;
        let port = listener.local_addr()?.port();
        tracing::info!("ipc: listening on 127.0.0.1:{port}");
        Ok(Self { listener, port, key: AUTH_KEY.to_vec() })
    }

    /// Replaces the pre-shared key clients must sign with.
    #[must_use]
    pub fn with_key(mut self, key: &[u8]) -> Self {
        self.key = key.to_vec();
        self
    }

    /// The port actually bound.
    #[must_use]
    pub const fn port(&self) -> u16 { self.port }

    /// Serves commands against `backend` until the stop message arrives, then
    /// waits for the consumer to drain the queue.
    ///
    /// # Errors
    ///
    /// Returns an error if the consumer thread cannot be started or dies.
    /// Problems with individual connections or commands are logged and never
    /// end the server.
    pub async fn run<B: DisplayBackend + 'static>(self, backend: B) -> IpcResult<ConsumerStats> {
        let (queue, commands) = mpsc::unbounded_channel();
        let consumer = spawn_named_thread("consumer", move || consume(commands, &backend))
            .map_err(|err| IpcError::Consumer(format!("failed to spawn thread: {err}")))?;

        listen(self.listener, Arc::from(self.key), queue).await;
        tracing::debug!("ipc: listener stopped, draining queued commands");

        let stats = tokio::task::spawn_blocking(move || consumer.join())
            .await
            .map_err(|err| IpcError::Consumer(err.to_string()))?
            .map_err(|_| IpcError::Consumer("consumer thread panicked".to_string()))?;

        tracing::info!(
            moved = stats.moved,
            unchanged = stats.unchanged,
            failed = stats.failed,
            ignored = stats.ignored,
            "ipc: server stopped"
        );
        Ok(stats)
    }
}

/// Accepts connections until an exchange carries the stop message. The
/// listener and this task's queue handle are dropped on return.
async fn listen(listener: TcpListener, key: Arc<[u8]>, queue: UnboundedSender<String>) {
    let (stop, mut stopped) = mpsc::unbounded_channel::<SocketAddr>();

    loop {
        tokio::select! {
            biased;

            Some(peer) = stopped.recv() => {
                tracing::info!("ipc: stop requested by {peer}");
                break;
            }

            accepted = listener.accept() => {
                let (stream, peer) = match accepted {
                    Ok(accepted) => accepted,
                    Err(err) => {
                        tracing::warn!("ipc: accept failed: {err}");
                        continue;
                    }
                };
                tokio::spawn(serve_connection(
                    stream,
                    peer,
                    Arc::clone(&key),
                    queue.clone(),
                    stop.clone(),
                ));
            }
        }
    }
}

async fn serve_connection(
    stream: TcpStream,
    peer: SocketAddr,
    key: Arc<[u8]>,
    queue: UnboundedSender<String>,
    stop: UnboundedSender<SocketAddr>,
) {
    let exchange = handle_connection(stream, &key, &queue);
    match tokio::time::timeout(CONNECTION_TIMEOUT, exchange).await {
        Ok(Ok(Received::Queued)) => {}
        Ok(Ok(Received::Stop)) => {
            // The listener may already be gone if another stop won.
            stop.send(peer).ok();
        }
        Ok(Err(err)) => tracing::warn!("ipc: rejected connection from {peer}: {err}"),
        Err(_) => tracing::warn!("ipc: connection from {peer} timed out"),
    }
}

async fn handle_connection(
    mut stream: TcpStream,
    key: &[u8],
    queue: &UnboundedSender<String>,
) -> IpcResult<Received> {
    let challenge = protocol::new_challenge();
    protocol::write_frame_async(&mut stream, &challenge).await?;

    let response = protocol::read_frame_async(&mut stream).await?;
    if !protocol::verify(key, &challenge, &response) {
        protocol::write_frame_async(&mut stream, FAILURE).await.ok();
        return Err(IpcError::AuthenticationFailed);
    }
    protocol::write_frame_async(&mut stream, WELCOME).await?;

    let payload = protocol::read_frame_async(&mut stream).await?;
    let envelope = match Envelope::from_bytes(&payload) {
        Ok(envelope) => envelope,
        Err(err) => {
            stream.write_all(&[NACK]).await.ok();
            return Err(err);
        }
    };

    tracing::debug!("ipc: received {:?}", envelope.message);

    if envelope.message == STOP_MESSAGE {
        stream.write_all(&[ACK]).await.ok();
        return Ok(Received::Stop);
    }

    if queue.send(envelope.message).is_err() {
        stream.write_all(&[NACK]).await.ok();
        return Err(IpcError::Consumer("command queue is closed".to_string()));
    }
    stream.write_all(&[ACK]).await.ok();
    Ok(Received::Queued)
}

/// Drains the queue until every sender is gone, running one pipeline per
/// message. Runs on its own thread because backend calls block.
fn consume<B: DisplayBackend>(
    mut commands: UnboundedReceiver<String>,
    backend: &B,
) -> ConsumerStats {
    let mut stats = ConsumerStats::default();

    while let Some(message) = commands.blocking_recv() {
        let Ok(direction) = message.parse::<Direction>() else {
            tracing::warn!("ipc: ignoring unknown message {message:?}");
            stats.ignored += 1;
            continue;
        };

        let result =
            panic::catch_unwind(AssertUnwindSafe(|| tiling::move_command(backend, direction)));

        match result {
            Ok(Ok(MoveOutcome::Moved { target, .. })) => {
                tracing::info!("tiling: {direction} -> {target}");
                stats.moved += 1;
            }
            Ok(Ok(MoveOutcome::Unchanged { .. })) => stats.unchanged += 1,
            Ok(Err(err)) => {
                tracing::error!("tiling: {direction} failed: {err}");
                stats.failed += 1;
            }
            Err(payload) => {
                let reason = payload
                    .downcast_ref::<&str>()
                    .map(ToString::to_string)
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                tracing::error!("tiling: {direction} panicked: {reason}");
                stats.failed += 1;
            }
        }
    }

    stats
}
