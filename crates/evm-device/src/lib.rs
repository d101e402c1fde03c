//! Serial-line gateway to the vote-input device
//!
//! The device writes one short code per line. [`SerialDevice::poll`] never
//! waits for a line to complete: bytes the driver already holds are moved
//! into a [`LineBuffer`] and at most one finished line is handed out per call.

mod line_buffer;
mod ports;

pub use line_buffer::LineBuffer;
pub use ports::{PortInfo, available_ports};

use evm_core::SignalSource;
use log::info;
use serialport::SerialPort;
use std::io::{self, Read};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("Unable to open vote device on {port}: {source}")]
    Unavailable {
        port: String,
        #[source]
        source: serialport::Error,
    },

    #[error("Vote device I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Vote device error: {0}")]
    Serial(#[from] serialport::Error),
}

pub type Result<T> = std::result::Result<T, DeviceError>;

pub struct SerialDevice {
    port: Box<dyn SerialPort>,
    name: String,
    buffer: LineBuffer,
}

impl SerialDevice {
    /// Open the serial channel. `read_timeout` bounds any read that finds the
    /// driver buffer empty after all.
    pub fn connect(port: &str, baud_rate: u32, read_timeout: Duration) -> Result<Self> {
        let handle = serialport::new(port, baud_rate)
            .timeout(read_timeout)
            .open()
            .map_err(|source| DeviceError::Unavailable {
                port: port.to_string(),
                source,
            })?;
        info!("Connected to vote device on {port} at {baud_rate} baud");

        Ok(Self {
            port: handle,
            name: port.to_string(),
            buffer: LineBuffer::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn fill(&mut self) -> Result<()> {
        let pending = self.port.bytes_to_read()? as usize;
        if pending == 0 {
            return Ok(());
        }

        let mut chunk = vec![0u8; pending];
        match self.port.read(&mut chunk) {
            Ok(n) => self.buffer.push(&chunk[..n]),
            // Raced with the driver; try again next poll
            Err(e) if e.kind() == io::ErrorKind::TimedOut => {}
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }
}

impl SignalSource for SerialDevice {
    type Error = DeviceError;

    fn poll(&mut self) -> Result<Option<String>> {
        if !self.buffer.has_line() {
            self.fill()?;
        }
        Ok(self.buffer.next_line())
    }
}
