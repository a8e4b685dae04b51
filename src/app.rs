use crate::cli::{self, Invocation};
use crate::config::SessionConfig;
use crate::constants::USAGE;
use crate::error::{Result, SerialExampleError};
use crate::link::{Backend, PortSettings};
use crate::probe::PROBE_MESSAGES;
use crate::session::Session;
use log::{debug, info};
use std::io::{BufRead, Write};

/// Run the program against `backend` and the given console streams.
///
/// Returns the process exit code. Errors are left to the caller to report.
pub fn run<B: Backend>(
    args: &[String],
    backend: &B,
    config: SessionConfig,
    out: &mut dyn Write,
    err: &mut dyn Write,
    input: &mut dyn BufRead,
) -> Result<i32> {
    let (port, baud, payload) = match cli::parse(args)? {
        Invocation::Usage { exit_code } => {
            writeln!(err, "{}", USAGE)?;
            return Ok(exit_code);
        }
        Invocation::Enumerate => {
            for listing in backend.list_ports()? {
                writeln!(out, "{}", listing)?;
            }
            return Ok(0);
        }
        Invocation::Probe { port, baud } => (port, baud, None),
        Invocation::Characterize {
            port,
            baud,
            payload,
        } => (port, baud, Some(payload)),
    };

    let link = backend.open(&PortSettings::new(&port, baud))?;
    let mut session = Session::new(link, config);
    info!("Connected to {} at {} baud", port, baud);

    write!(out, "Is the serial port open?")?;
    writeln!(out, "{}", if session.is_open() { " Yes." } else { " No." })?;

    match payload {
        Some(payload) => {
            session.characterize(&payload, out)?;
        }
        None => {
            session.probe(&PROBE_MESSAGES, out)?;
            writeln!(out, "run finished.")?;
            out.flush()?;

            let mut line = String::new();
            input.read_line(&mut line)?;
        }
    }

    Ok(0)
}

/// Report an error that ended the run as a single line on `err`
pub fn report_error(error: &SerialExampleError, err: &mut dyn Write) -> std::io::Result<()> {
    debug!("{:?}", error);
    writeln!(err, "Unhandled Exception: {}", error)
}
