//! Defaults for the serial test harness.
//!
//! Framing, timeout budgets and loop sizes used when opening a port and
//! running either the probe sequence or the timeout characterization.

/// Data bits used when opening a port
pub const DATA_BITS: serialport::DataBits = serialport::DataBits::Eight;

/// Parity used when opening a port
pub const PARITY: serialport::Parity = serialport::Parity::Odd;

/// Stop bits used when opening a port
pub const STOP_BITS: serialport::StopBits = serialport::StopBits::One;

/// Read/write timeout applied when the port is opened, in milliseconds
pub const OPEN_TIMEOUT_MS: u32 = 1000;

/// Read/write timeout used by the probe sequence, in milliseconds
pub const PROBE_TIMEOUT_MS: u32 = 500;

/// Shorter timeout used by the last three characterization loops
pub const FAST_TIMEOUT_MS: u32 = 250;

/// Write/read iterations per characterization loop
pub const ITERATIONS: usize = 10;

/// A probe reply is read with a budget of this many bytes per byte sent
pub const PROBE_READ_FACTOR: usize = 50;

/// Terminator appended after the checksum digits
pub const TERMINATOR: u8 = b'\r';

/// First argument that selects port enumeration
pub const ENUMERATE_FLAG: &str = "-e";

/// Printed on stderr when arguments are missing
pub const USAGE: &str = "Usage: test_serial {-e|<serial port address>} <baudrate> [test string]";

/// Environment variable holding the pause between probe messages
pub const PROBE_GAP_ENV: &str = "TEST_SERIAL_PROBE_GAP_MS";

/// Environment variable enabling TX/RX hex dumps (`tx`, `rx` or `all`)
pub const DEBUG_ENV: &str = "TEST_SERIAL_DEBUG";
