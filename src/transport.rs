//! Dialer trait for link establishment.

use tokio::io::{AsyncRead, AsyncWrite};

use crate::Result;
use crate::types::DeviceInfo;

/// Byte-duplex link requirements.
///
/// Anything that reads and writes bytes asynchronously can carry a session:
/// a serial port, an in-memory duplex pipe, a socket.
pub trait LinkIo: AsyncRead + AsyncWrite + Unpin + Send {}
impl<T: AsyncRead + AsyncWrite + Unpin + Send> LinkIo for T {}

/// An established link plus the identity of the endpoint it reaches.
pub struct DialedLink {
    pub device: DeviceInfo,
    pub io: Box<dyn LinkIo>,
}

/// Trait for link factories.
///
/// Dialers abstract over how a device id resolves to a byte transport
/// (serial device path, in-memory pipe for tests) and perform whatever
/// handshake the transport needs. The session owns the returned link
/// exclusively; a dialer is only consulted again on reconnect.
#[async_trait::async_trait]
pub trait Dialer: Send + Sync + 'static {
    /// Resolve `device_id` to a reachable endpoint and open the link.
    ///
    /// Returns:
    /// - `Ok(link)` - handshake complete, the link is ready for IO
    /// - `Err(e)` - the endpoint is unreachable or the transport refused us
    async fn dial(&self, device_id: &str) -> Result<DialedLink>;
}
