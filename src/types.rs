use chrono::{DateTime, Utc};
use serde::Serialize;
use serialport::{SerialPortInfo, SerialPortType};
use std::fmt;

const NOT_AVAILABLE: &str = "n/a";

/// One entry of the port enumeration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortListing {
    pub port: String,
    pub description: String,
    pub hardware_id: String,
}

impl PortListing {
    pub fn new(port: &str, description: &str, hardware_id: &str) -> Self {
        Self {
            port: port.to_string(),
            description: description.to_string(),
            hardware_id: hardware_id.to_string(),
        }
    }
}

impl From<SerialPortInfo> for PortListing {
    fn from(info: SerialPortInfo) -> Self {
        let (description, hardware_id) = match info.port_type {
            SerialPortType::UsbPort(usb) => {
                let description = usb
                    .product
                    .or(usb.manufacturer)
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string());
                let mut hardware_id = format!("USB VID:PID={:04x}:{:04x}", usb.vid, usb.pid);
                if let Some(serial) = usb.serial_number {
                    hardware_id.push_str(&format!(" SNR={}", serial));
                }
                (description, hardware_id)
            }
            SerialPortType::PciPort => (NOT_AVAILABLE.to_string(), "PCI".to_string()),
            SerialPortType::BluetoothPort => (NOT_AVAILABLE.to_string(), "Bluetooth".to_string()),
            _ => (NOT_AVAILABLE.to_string(), NOT_AVAILABLE.to_string()),
        };

        Self {
            port: info.port_name,
            description,
            hardware_id,
        }
    }
}

impl fmt::Display for PortListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.port, self.description, self.hardware_id)
    }
}

/// Read length requested relative to the bytes just written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadLength {
    OneMore,
    Exact,
    OneLess,
}

impl ReadLength {
    pub fn requested(self, written: usize) -> usize {
        match self {
            ReadLength::OneMore => written + 1,
            ReadLength::Exact => written,
            ReadLength::OneLess => written.saturating_sub(1),
        }
    }

    /// Wording used in the loop header
    pub fn describe(self) -> &'static str {
        match self {
            ReadLength::OneMore => "1 more byte than written",
            ReadLength::Exact => "exactly what was written",
            ReadLength::OneLess => "1 less than was written",
        }
    }
}

/// One probe message and the reply it got
#[derive(Debug, Clone, Serialize)]
pub struct Exchange {
    pub request: String,
    pub written: usize,
    pub response: Vec<u8>,
    /// Reply ended in a matching BCC
    pub bcc_valid: bool,
}

/// One write/read pair of a characterization loop
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IterationResult {
    pub index: usize,
    pub written: usize,
    pub requested: usize,
    pub read: usize,
    pub elapsed_ms: f64,
    pub data: String,
}

impl IterationResult {
    /// Fewer bytes arrived than were asked for
    pub fn timed_out(&self) -> bool {
        self.read < self.requested
    }
}

/// One characterization loop
#[derive(Debug, Clone, Serialize)]
pub struct TimeoutRun {
    pub timeout_ms: u32,
    pub read_length: ReadLength,
    pub started_at: DateTime<Utc>,
    pub iterations: Vec<IterationResult>,
}

impl TimeoutRun {
    pub fn header(&self) -> String {
        format!(
            "Timeout == {}ms, asking for {}.",
            self.timeout_ms,
            self.read_length.describe()
        )
    }

    pub fn timeouts(&self) -> usize {
        self.iterations.iter().filter(|i| i.timed_out()).count()
    }
}
