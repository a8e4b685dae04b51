use crate::constants::*;
use crate::error::Result;
use crate::timeout::Timeout;
use crate::types::PortListing;
use log::{debug, trace};
use serialport::SerialPort;
use std::io::{self, Read, Write};
use std::time::{Duration, Instant};

/// Byte-level access to an open connection.
///
/// `read` and `write` stop early when the current timeout budget runs out;
/// a short count is a result, not an error.
pub trait Link {
    fn is_open(&self) -> bool;

    fn set_timeout(&mut self, timeout: Timeout) -> Result<()>;

    /// Returns the number of bytes written
    fn write(&mut self, data: &[u8]) -> Result<usize>;

    /// Reads up to `len` bytes
    fn read(&mut self, len: usize) -> Result<Vec<u8>>;
}

/// Opens links and lists the ports that can be opened
pub trait Backend {
    type Link: Link;

    fn list_ports(&self) -> Result<Vec<PortListing>>;

    fn open(&self, settings: &PortSettings) -> Result<Self::Link>;
}

/// Everything needed to open a port
#[derive(Debug, Clone, PartialEq)]
pub struct PortSettings {
    pub port_name: String,
    pub baud_rate: u32,
    pub data_bits: serialport::DataBits,
    pub parity: serialport::Parity,
    pub stop_bits: serialport::StopBits,
    pub timeout: Timeout,
}

impl PortSettings {
    /// Default framing (8O1) and the open timeout
    pub fn new(port_name: &str, baud_rate: u32) -> Self {
        Self {
            port_name: port_name.to_string(),
            baud_rate,
            data_bits: DATA_BITS,
            parity: PARITY,
            stop_bits: STOP_BITS,
            timeout: Timeout::simple(OPEN_TIMEOUT_MS),
        }
    }
}

/// Backend over the operating system's serial ports
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBackend;

impl Backend for SystemBackend {
    type Link = SerialLink;

    fn list_ports(&self) -> Result<Vec<PortListing>> {
        Ok(serialport::available_ports()?
            .into_iter()
            .map(PortListing::from)
            .collect())
    }

    fn open(&self, settings: &PortSettings) -> Result<SerialLink> {
        debug!(
            "Opening {} at {} baud ({:?}, {:?}, {:?})",
            settings.port_name,
            settings.baud_rate,
            settings.data_bits,
            settings.parity,
            settings.stop_bits
        );
        let port = serialport::new(settings.port_name.as_str(), settings.baud_rate)
            .data_bits(settings.data_bits)
            .parity(settings.parity)
            .stop_bits(settings.stop_bits)
            .timeout(settings.timeout.read_budget(0))
            .open()?;

        Ok(SerialLink::new(port, settings.timeout))
    }
}

/// [`Link`] over a `serialport` handle.
///
/// The handle's own timeout is rearmed before every call so that the
/// whole operation respects the [`Timeout`] budget.
pub struct SerialLink {
    port: Box<dyn SerialPort>,
    timeout: Timeout,
}

impl SerialLink {
    pub fn new(port: Box<dyn SerialPort>, timeout: Timeout) -> Self {
        Self { port, timeout }
    }

    /// Time left until `deadline`, `None` once it has passed
    fn remaining(deadline: Option<Instant>) -> Option<Duration> {
        match deadline {
            Some(deadline) => deadline
                .checked_duration_since(Instant::now())
                .filter(|left| !left.is_zero()),
            // Budget too large to represent
            None => Some(Duration::from_secs(u32::MAX as u64)),
        }
    }
}

impl Link for SerialLink {
    fn is_open(&self) -> bool {
        true
    }

    fn set_timeout(&mut self, timeout: Timeout) -> Result<()> {
        debug!("Timeout set to {:?}", timeout);
        self.timeout = timeout;
        Ok(())
    }

    fn write(&mut self, data: &[u8]) -> Result<usize> {
        let deadline = Instant::now().checked_add(self.timeout.write_budget(data.len()));
        let mut written = 0;

        while written < data.len() {
            let Some(left) = Self::remaining(deadline) else {
                break;
            };
            self.port.set_timeout(left)?;
            match self.port.write(&data[written..]) {
                Ok(0) => break,
                Ok(n) => written += n,
                Err(e) if e.kind() == io::ErrorKind::TimedOut => break,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        // Draining has no timeout of its own
        if written == data.len() {
            self.port.flush()?;
        }

        trace!("wrote {}/{} bytes", written, data.len());
        Ok(written)
    }

    fn read(&mut self, len: usize) -> Result<Vec<u8>> {
        let deadline = Instant::now().checked_add(self.timeout.read_budget(len));
        let gap = self.timeout.inter_byte_gap();
        let mut buffer = vec![0u8; len];
        let mut filled = 0;

        while filled < len {
            let Some(mut wait) = Self::remaining(deadline) else {
                break;
            };
            if let (Some(gap), true) = (gap, filled > 0) {
                wait = wait.min(gap);
            }
            self.port.set_timeout(wait)?;
            match self.port.read(&mut buffer[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::TimedOut => {
                    // Either the total budget or the inter-byte gap ran out
                    break;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        buffer.truncate(filled);
        trace!("read {}/{} bytes", filled, len);
        Ok(buffer)
    }
}
