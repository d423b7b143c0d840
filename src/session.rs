//! Transport session: connection lifecycle and async byte IO.
//!
//! [`TransportSession`] owns the physical link exclusively and decouples the
//! parsing pipeline from transport details. Lifecycle and data callbacks are
//! expressed as [`SessionEvent`]s on a single-consumer channel, so the
//! consumer observes them serialized, in emission order, never concurrently.
//!
//! One background task per connection performs the blocking reads. The
//! channel is unbounded on purpose: the sensor protocol has no flow control,
//! so the read loop must never stall behind a slow consumer.

use std::sync::Arc;

use bytes::Bytes;
use tokio::io::{AsyncReadExt, AsyncWriteExt, ReadHalf, WriteHalf};
use tokio::sync::{Mutex, mpsc, watch};
use tokio::task::JoinHandle;
use tokio_stream::wrappers::WatchStream;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use crate::TransportError;
use crate::transport::{Dialer, LinkIo};
use crate::types::{Command, ConnectionState, SessionEvent};

const READ_BUF_LEN: usize = 1024;

type SharedWriter = Arc<Mutex<WriteHalf<Box<dyn LinkIo>>>>;

/// Owner of one transport connection.
///
/// State machine: `Disconnected -> Connecting -> Connected -> Disconnected`.
/// Transitions happen only in [`connect`](Self::connect),
/// [`disconnect`](Self::disconnect), and on IO failure in the background
/// read task. Connect/disconnect outcomes are delivered through the event
/// channel, not as return values.
pub struct TransportSession {
    dialer: Arc<dyn Dialer>,
    events: mpsc::UnboundedSender<SessionEvent>,
    state: watch::Sender<ConnectionState>,
    writer: Option<SharedWriter>,
    read_task: Option<JoinHandle<()>>,
    cancel: CancellationToken,
}

impl TransportSession {
    /// Create a session and the single-consumer event channel it feeds.
    pub fn new(dialer: impl Dialer) -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        Self::with_dialer(Arc::new(dialer))
    }

    pub fn with_dialer(
        dialer: Arc<dyn Dialer>,
    ) -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (events, events_rx) = mpsc::unbounded_channel();
        let (state, _) = watch::channel(ConnectionState::Disconnected);
        let session = Self {
            dialer,
            events,
            state,
            writer: None,
            read_task: None,
            cancel: CancellationToken::new(),
        };
        (session, events_rx)
    }

    /// Connect to `device_id`, tearing down any existing connection first.
    ///
    /// Suspends through the dial/handshake; the outcome is still reported
    /// only via events (`Connected` on success, `ConnectionError` on
    /// failure, in which case the session is back in `Disconnected`).
    pub async fn connect(&mut self, device_id: &str) {
        if self.state() != ConnectionState::Disconnected || self.read_task.is_some() {
            self.disconnect().await;
        }

        self.set_state(ConnectionState::Connecting);
        info!(device = device_id, "connecting");

        match self.dialer.dial(device_id).await {
            Ok(link) => {
                let (read_half, write_half) = tokio::io::split(link.io);
                self.writer = Some(Arc::new(Mutex::new(write_half)));
                self.cancel = CancellationToken::new();

                self.set_state(ConnectionState::Connected);
                info!(device = %link.device.address, "connected");
                let _ = self.events.send(SessionEvent::Connected(link.device));

                self.read_task = Some(tokio::spawn(read_loop(
                    read_half,
                    self.events.clone(),
                    self.state.clone(),
                    self.cancel.clone(),
                )));
            }
            Err(err) => {
                self.set_state(ConnectionState::Disconnected);
                warn!(device = device_id, error = %err, "connect failed");
                let _ = self.events.send(SessionEvent::ConnectionError(err));
            }
        }
    }

    /// Disconnect and release the link.
    ///
    /// Cancels the background read task and waits for it to finish before
    /// emitting `Disconnected`, so no chunk delivery can follow that event.
    /// Safe from any state; a no-op when already disconnected.
    pub async fn disconnect(&mut self) {
        self.cancel.cancel();
        if let Some(task) = self.read_task.take() {
            let _ = task.await;
        }
        self.writer = None;

        if self.state() == ConnectionState::Disconnected {
            // Never connected, or the read task already reported the loss.
            return;
        }

        self.set_state(ConnectionState::Disconnected);
        info!("disconnected");
        let _ = self.events.send(SessionEvent::Disconnected);
    }

    /// Queue `payload` for transmission, best-effort.
    ///
    /// Returns immediately; the write happens on a dedicated path. Failures
    /// (including sending while disconnected) emit `ConnectionError` but
    /// never change connection state.
    pub fn send(&self, payload: impl Into<Bytes>) {
        let Some(writer) = self.writer.clone() else {
            warn!("send ignored: not connected");
            let _ = self.events.send(SessionEvent::ConnectionError(TransportError::NotConnected));
            return;
        };

        let payload: Bytes = payload.into();
        let events = self.events.clone();
        tokio::spawn(async move {
            let mut guard = writer.lock().await;
            let result = async {
                guard.write_all(&payload).await?;
                guard.flush().await
            }
            .await;

            if let Err(err) = result {
                warn!(error = %err, "send failed");
                let _ = events.send(SessionEvent::ConnectionError(TransportError::send_failed(
                    err.to_string(),
                    Some(err),
                )));
            }
        });
    }

    /// Send a control command as its ASCII wire line.
    pub fn send_command(&self, command: Command) {
        debug!(command = command.as_str(), "sending command");
        self.send(Bytes::from(command.line()));
    }

    /// Current connection state.
    pub fn state(&self) -> ConnectionState {
        *self.state.borrow()
    }

    pub fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }

    /// State transitions as a stream (yields the current state first).
    pub fn state_changes(&self) -> WatchStream<ConnectionState> {
        WatchStream::new(self.state.subscribe())
    }

    fn set_state(&self, state: ConnectionState) {
        let _ = self.state.send_replace(state);
    }
}

impl Drop for TransportSession {
    fn drop(&mut self) {
        debug!("dropping transport session");
        // Cancel the read task on drop for clean shutdown.
        self.cancel.cancel();
    }
}

/// Background read task: blocks for bytes, forwards non-empty chunks.
///
/// Cancellation returns without emitting anything; `disconnect()` owns the
/// `Disconnected` event in that case. EOF and read errors tear the link
/// down from here: `ConnectionError` first, then `Disconnected`.
async fn read_loop(
    mut reader: ReadHalf<Box<dyn LinkIo>>,
    events: mpsc::UnboundedSender<SessionEvent>,
    state: watch::Sender<ConnectionState>,
    cancel: CancellationToken,
) {
    debug!("read task started");
    let mut buf = [0u8; READ_BUF_LEN];

    loop {
        let read = tokio::select! {
            _ = cancel.cancelled() => {
                debug!("read task cancelled");
                return;
            }
            read = reader.read(&mut buf) => read,
        };

        match read {
            Ok(0) => {
                let _ = events.send(SessionEvent::ConnectionError(
                    TransportError::read_interrupted("link closed by peer", None),
                ));
                break;
            }
            Ok(n) => {
                trace!(len = n, "chunk received");
                let _ = events.send(SessionEvent::Bytes(Bytes::copy_from_slice(&buf[..n])));
            }
            Err(err) => {
                warn!(error = %err, "read failed");
                let _ = events.send(SessionEvent::ConnectionError(err.into()));
                break;
            }
        }
    }

    let _ = state.send_replace(ConnectionState::Disconnected);
    let _ = events.send(SessionEvent::Disconnected);
    debug!("read task ended");
}
