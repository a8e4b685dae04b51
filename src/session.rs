use crate::bcc;
use crate::config::SessionConfig;
use crate::delay::{Delay, ThreadDelay};
use crate::error::{Result, SerialExampleError};
use crate::link::Link;
use crate::timeout::Timeout;
use crate::types::*;
use chrono::Utc;
use log::{debug, info, log_enabled, Level};
use std::io::Write;
use std::time::Instant;

/// Drives the probe and characterization sequences over an open link
pub struct Session<L: Link> {
    link: L,
    config: SessionConfig,
    delay: Box<dyn Delay>,
}

impl<L: Link> Session<L> {
    pub fn new(link: L, config: SessionConfig) -> Self {
        Self::with_delay(link, config, Box::new(ThreadDelay))
    }

    pub fn with_delay(link: L, config: SessionConfig, delay: Box<dyn Delay>) -> Self {
        Self {
            link,
            config,
            delay,
        }
    }

    pub fn is_open(&self) -> bool {
        self.link.is_open()
    }

    /// Enable/disable hex dumps of sent and received bytes
    pub fn set_debug_print(&mut self, tx: bool, rx: bool) {
        self.config.print_tx = tx;
        self.config.print_rx = rx;
    }

    fn hex(bytes: &[u8]) -> String {
        bytes
            .iter()
            .map(|b| format!("{:02X}", b))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Write raw bytes, refusing if the link is closed
    pub fn send(&mut self, data: &[u8], out: &mut dyn Write) -> Result<usize> {
        if !self.link.is_open() {
            return Err(SerialExampleError::PortNotOpen(
                String::from_utf8_lossy(data).into_owned(),
            ));
        }

        if self.config.print_tx {
            writeln!(out, "Sending:  {}", Self::hex(data))?;
        }
        self.link.write(data)
    }

    /// Read up to `len` bytes
    pub fn receive(&mut self, len: usize, out: &mut dyn Write) -> Result<Vec<u8>> {
        let data = self.link.read(len)?;
        if self.config.print_rx {
            writeln!(out, "Received: {}", Self::hex(&data))?;
        }
        Ok(data)
    }

    /// Send each message with its BCC and print the replies
    pub fn probe(&mut self, messages: &[&str], out: &mut dyn Write) -> Result<Vec<Exchange>> {
        self.link.set_timeout(self.config.probe_timeout)?;
        let mut exchanges = Vec::with_capacity(messages.len());

        for (i, message) in messages.iter().enumerate() {
            if i > 0 && !self.config.probe_gap.is_zero() {
                self.delay.pause(self.config.probe_gap);
            }

            let framed = bcc::frame(message);
            let written = self.send(framed.as_bytes(), out)?;
            writeln!(out, ">>({}):\t{}", written, framed)?;

            let response = self.receive(framed.len() * self.config.probe_read_factor, out)?;
            write!(out, "<<({}):\t", response.len())?;
            out.write_all(&response)?;
            writeln!(out)?;
            writeln!(out)?;

            let bcc_valid = bcc::verify(&response);
            debug!(
                "probe {}: {} bytes back, BCC {}",
                i,
                response.len(),
                if bcc_valid { "ok" } else { "bad" }
            );

            exchanges.push(Exchange {
                request: framed,
                written,
                response,
                bcc_valid,
            });
        }

        Ok(exchanges)
    }

    /// Run the four write/read loops against `payload` plus its BCC
    pub fn characterize(&mut self, payload: &str, out: &mut dyn Write) -> Result<Vec<TimeoutRun>> {
        let framed = bcc::frame(payload);
        writeln!(out, "send:{}", framed)?;

        let plan = [
            (self.config.slow_timeout_ms, ReadLength::OneMore),
            (self.config.fast_timeout_ms, ReadLength::OneMore),
            (self.config.fast_timeout_ms, ReadLength::Exact),
            (self.config.fast_timeout_ms, ReadLength::OneLess),
        ];

        let mut runs = Vec::with_capacity(plan.len());
        for (timeout_ms, read_length) in plan {
            let run = self.run_loop(framed.as_bytes(), timeout_ms, read_length, out)?;
            info!(
                "{}ms / {:?}: {} of {} reads came back short",
                timeout_ms,
                read_length,
                run.timeouts(),
                run.iterations.len()
            );
            runs.push(run);
        }

        if log_enabled!(Level::Debug) {
            debug!("run summary: {}", serde_json::to_string(&runs)?);
        }
        Ok(runs)
    }

    fn run_loop(
        &mut self,
        framed: &[u8],
        timeout_ms: u32,
        read_length: ReadLength,
        out: &mut dyn Write,
    ) -> Result<TimeoutRun> {
        self.link.set_timeout(Timeout::simple(timeout_ms))?;

        let mut run = TimeoutRun {
            timeout_ms,
            read_length,
            started_at: Utc::now(),
            iterations: Vec::with_capacity(self.config.iterations),
        };
        writeln!(out, "{}", run.header())?;

        let requested = read_length.requested(framed.len());
        for index in 0..self.config.iterations {
            let start = Instant::now();
            let written = self.send(framed, out)?;
            let data = self.receive(requested, out)?;
            let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

            let result = IterationResult {
                index,
                written,
                requested,
                read: data.len(),
                elapsed_ms,
                data: String::from_utf8_lossy(&data).into_owned(),
            };
            write!(
                out,
                "Iteration: {}, Bytes written: {}, Bytes read: {}, String read: ",
                result.index, result.written, result.read
            )?;
            out.write_all(&data)?;
            writeln!(out)?;
            debug!("iteration {} took {:.1}ms", index, elapsed_ms);

            run.iterations.push(result);
        }

        Ok(run)
    }
}
