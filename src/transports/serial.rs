//! Serial-port dialer.
//!
//! Wireless biosignal front-ends expose a classic serial profile; once the
//! OS has bound the device (e.g. `rfcomm bind`), it is an ordinary serial
//! path like `/dev/rfcomm0`. The dialer opens that path 8N1 with no flow
//! control; the device streams continuously and the protocol has none.

use tokio_serial::SerialPortBuilderExt;
use tracing::info;

use crate::transport::{DialedLink, Dialer};
use crate::types::DeviceInfo;
use crate::{Result, TransportError};

/// Default baud rate for biosignal serial front-ends.
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Dialer that opens a local serial device path.
#[derive(Debug, Clone)]
pub struct SerialDialer {
    baud_rate: u32,
}

impl Default for SerialDialer {
    fn default() -> Self {
        Self { baud_rate: DEFAULT_BAUD_RATE }
    }
}

impl SerialDialer {
    pub fn new(baud_rate: u32) -> Self {
        Self { baud_rate }
    }

    pub fn baud_rate(&self) -> u32 {
        self.baud_rate
    }
}

#[async_trait::async_trait]
impl Dialer for SerialDialer {
    async fn dial(&self, device_id: &str) -> Result<DialedLink> {
        let port = tokio_serial::new(device_id, self.baud_rate)
            .data_bits(tokio_serial::DataBits::Eight)
            .parity(tokio_serial::Parity::None)
            .stop_bits(tokio_serial::StopBits::One)
            .flow_control(tokio_serial::FlowControl::None)
            .open_native_async()
            .map_err(|e| match TransportError::from(e) {
                TransportError::Connection { reason, source, .. } => TransportError::Connection {
                    device: device_id.to_string(),
                    reason,
                    source,
                },
                other => other,
            })?;

        info!(port = device_id, baud = self.baud_rate, "opened serial link");

        Ok(DialedLink {
            device: DeviceInfo::new(device_id, device_id),
            io: Box::new(port),
        })
    }
}
