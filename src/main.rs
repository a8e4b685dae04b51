//! `test_serial`: enumerate serial ports, probe a device, or characterize
//! read/write timeouts over a loopback.
//!
//! Usage:
//!   test_serial -e                          # list ports
//!   test_serial /dev/ttyUSB0 9600           # canned probe sequence
//!   test_serial COM3 115200 "hello"         # timeout loops
//!
//! Set RUST_LOG environment variable to control logging:
//!   RUST_LOG=debug test_serial COM3 115200 hello

use serial_example::{app, SessionConfig, SystemBackend};
use std::io;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();
    let stdin = io::stdin();
    let stdout = io::stdout();

    let result = SessionConfig::from_env().and_then(|config| {
        app::run(
            &args,
            &SystemBackend,
            config,
            &mut stdout.lock(),
            &mut io::stderr(),
            &mut stdin.lock(),
        )
    });

    let code = match result {
        Ok(code) => code,
        Err(e) => {
            let _ = app::report_error(&e, &mut io::stderr());
            0
        }
    };

    std::process::exit(code);
}
