//! # Serial Example
//!
//! A small harness for exercising serial ports: list what is attached,
//! send a canned BCC-framed probe sequence to a device, or characterize
//! read/write timeout behavior over a loopback.
//!
//! ## Features
//!
//! - Port enumeration as `(port, description, hardware_id)` tuples
//! - Block Check Character (XOR) framing of outgoing messages
//! - Total and inter-byte read/write timeout budgets on top of `serialport`
//! - Timeout characterization loops with per-iteration byte counts
//! - Pluggable [`Link`] and [`Backend`] so sessions run against any byte pipe
//!
//! ## Example
//!
//! ```no_run
//! use serial_example::{Backend, PortSettings, Session, SessionConfig, SystemBackend};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let link = SystemBackend.open(&PortSettings::new("/dev/ttyUSB0", 9600))?;
//!     let mut session = Session::new(link, SessionConfig::default());
//!     let runs = session.characterize("hello", &mut std::io::stdout())?;
//!     println!("{} loops", runs.len());
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod bcc;
pub mod cli;
pub mod config;
pub mod constants;
pub mod delay;
pub mod error;
pub mod link;
pub mod probe;
pub mod session;
pub mod timeout;
pub mod types;

pub use config::SessionConfig;
pub use delay::{Delay, ThreadDelay};
pub use error::{Result, SerialExampleError};
pub use link::{Backend, Link, PortSettings, SerialLink, SystemBackend};
pub use session::Session;
pub use timeout::Timeout;
pub use types::*;
