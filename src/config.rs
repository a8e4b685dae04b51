//! Runtime settings for a test session.
//!
//! Defaults come from [`crate::constants`]. Two environment variables
//! adjust them without touching the command line:
//!
//! - `TEST_SERIAL_PROBE_GAP_MS`: pause between probe messages
//! - `TEST_SERIAL_DEBUG`: `tx`, `rx` or `all` to hex-dump traffic

use crate::constants::*;
use crate::error::{Result, SerialExampleError};
use crate::timeout::Timeout;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Timeout set before the probe sequence
    pub probe_timeout: Timeout,
    /// Reply budget in bytes per byte sent
    pub probe_read_factor: usize,
    /// Pause between probe messages
    pub probe_gap: Duration,
    /// Iterations per characterization loop
    pub iterations: usize,
    /// Timeout of the first characterization loop
    pub slow_timeout_ms: u32,
    /// Timeout of the remaining characterization loops
    pub fast_timeout_ms: u32,
    pub print_tx: bool,
    pub print_rx: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            probe_timeout: Timeout::new(Timeout::MAX, PROBE_TIMEOUT_MS, 0, PROBE_TIMEOUT_MS, 0),
            probe_read_factor: PROBE_READ_FACTOR,
            probe_gap: Duration::ZERO,
            iterations: ITERATIONS,
            slow_timeout_ms: OPEN_TIMEOUT_MS,
            fast_timeout_ms: FAST_TIMEOUT_MS,
            print_tx: false,
            print_rx: false,
        }
    }
}

impl SessionConfig {
    /// Defaults with overrides from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults with overrides from `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(PROBE_GAP_ENV) {
            let ms: u64 = value.trim().parse().map_err(|_| invalid(PROBE_GAP_ENV, &value))?;
            config.probe_gap = Duration::from_millis(ms);
        }

        if let Some(value) = lookup(DEBUG_ENV) {
            let (tx, rx) = match value.trim().to_ascii_lowercase().as_str() {
                "" | "off" | "none" => (false, false),
                "tx" => (true, false),
                "rx" => (false, true),
                "all" | "both" => (true, true),
                _ => return Err(invalid(DEBUG_ENV, &value)),
            };
            config.print_tx = tx;
            config.print_rx = rx;
        }

        Ok(config)
    }
}

fn invalid(key: &str, value: &str) -> SerialExampleError {
    SerialExampleError::InvalidConfig {
        key: key.to_string(),
        value: value.to_string(),
    }
}
