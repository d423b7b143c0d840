//! In-memory dialer for tests and hardware-free operation.
//!
//! Each queued endpoint is one half of a `tokio::io::duplex` pipe; the other
//! half stays with the caller, who plays the device: write bytes to feed the
//! session's read loop, read bytes to observe sent commands, drop it to
//! simulate the link going away.

use std::collections::VecDeque;

use tokio::io::DuplexStream;
use tokio::sync::Mutex;

use crate::transport::{DialedLink, Dialer};
use crate::types::DeviceInfo;
use crate::{Result, TransportError};

const PIPE_CAPACITY: usize = 64 * 1024;

/// Dialer that hands out pre-queued in-memory links.
///
/// `dial` consumes one endpoint per call; when the queue is empty the dial
/// fails with a `Connection` error, which makes reconnect-after-failure
/// scenarios straightforward to script.
pub struct MemoryDialer {
    endpoints: Mutex<VecDeque<DuplexStream>>,
}

impl MemoryDialer {
    /// A dialer with a single endpoint, plus the peer half for the caller.
    pub fn single() -> (Self, DuplexStream) {
        let (near, far) = tokio::io::duplex(PIPE_CAPACITY);
        let dialer = Self { endpoints: Mutex::new(VecDeque::from([near])) };
        (dialer, far)
    }

    /// A dialer with `count` endpoints, plus all peer halves in dial order.
    pub fn with_endpoints(count: usize) -> (Self, Vec<DuplexStream>) {
        let mut near_halves = VecDeque::with_capacity(count);
        let mut far_halves = Vec::with_capacity(count);
        for _ in 0..count {
            let (near, far) = tokio::io::duplex(PIPE_CAPACITY);
            near_halves.push_back(near);
            far_halves.push(far);
        }
        (Self { endpoints: Mutex::new(near_halves) }, far_halves)
    }

    /// A dialer that always fails to dial.
    pub fn unreachable() -> Self {
        Self { endpoints: Mutex::new(VecDeque::new()) }
    }
}

#[async_trait::async_trait]
impl Dialer for MemoryDialer {
    async fn dial(&self, device_id: &str) -> Result<DialedLink> {
        let endpoint = self.endpoints.lock().await.pop_front().ok_or_else(|| {
            TransportError::connection_failed(device_id, "no endpoint available")
        })?;

        Ok(DialedLink {
            device: DeviceInfo::new(device_id, format!("mem:{device_id}")),
            io: Box::new(endpoint),
        })
    }
}
