//! Error types for the serial test harness.

use thiserror::Error;

/// Result type alias for harness operations.
pub type Result<T> = std::result::Result<T, SerialExampleError>;

/// Errors raised while enumerating, opening or exercising a serial port.
#[derive(Error, Debug)]
pub enum SerialExampleError {
    /// Serial port communication error
    #[error("Serial port error: {0}")]
    SerialPort(#[from] serialport::Error),

    /// General I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Baud rate argument could not be parsed
    #[error("Invalid baud rate: {0:?}")]
    InvalidBaudRate(String),

    /// A write was attempted on a link that is not open
    #[error("Serial port is not open: {0}")]
    PortNotOpen(String),

    /// Environment override held an unusable value
    #[error("Invalid value for {key}: {value:?}")]
    InvalidConfig {
        /// Name of the setting
        key: String,
        /// Value that was rejected
        value: String,
    },

    /// Run summary could not be serialized
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
