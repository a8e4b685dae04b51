//! Command line parsing.
//!
//! `test_serial {-e|<serial port address>} <baudrate> [test string]`

use crate::constants::ENUMERATE_FLAG;
use crate::error::{Result, SerialExampleError};

/// What the program was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Print usage and exit with `exit_code`
    Usage { exit_code: i32 },
    /// List the available ports
    Enumerate,
    /// Run the canned probe sequence
    Probe { port: String, baud: u32 },
    /// Run the timeout loops with a test string
    Characterize {
        port: String,
        baud: u32,
        payload: String,
    },
}

/// Parse `args` including the program name at index 0
pub fn parse(args: &[String]) -> Result<Invocation> {
    let Some(port) = args.get(1) else {
        return Ok(Invocation::Usage { exit_code: 0 });
    };

    if port == ENUMERATE_FLAG {
        return Ok(Invocation::Enumerate);
    }

    let Some(baud) = args.get(2) else {
        return Ok(Invocation::Usage { exit_code: 1 });
    };
    let baud = parse_baud(baud)?;
    let port = port.clone();

    // A test string is only taken when it is the last argument
    Ok(match args {
        [_, _, _, payload] => Invocation::Characterize {
            port,
            baud,
            payload: payload.clone(),
        },
        _ => Invocation::Probe { port, baud },
    })
}

/// Leading decimal digits after optional whitespace and `+`.
/// Trailing characters are ignored, as `%lu` would.
pub fn parse_baud(text: &str) -> Result<u32> {
    let trimmed = text.trim_start();
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());

    match trimmed[..end].parse::<u32>() {
        Ok(baud) if baud > 0 => Ok(baud),
        _ => Err(SerialExampleError::InvalidBaudRate(text.to_string())),
    }
}
