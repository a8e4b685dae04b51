//! Read/write timeout budgets.
//!
//! A budget is `constant + multiplier * len` milliseconds for the whole
//! operation. The inter-byte bound only applies once a read has received
//! at least one byte.

use serde::Serialize;
use std::time::Duration;

/// Timeout configuration for a serial link, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Timeout {
    pub inter_byte: u32,
    pub read_constant: u32,
    pub read_multiplier: u32,
    pub write_constant: u32,
    pub write_multiplier: u32,
}

impl Timeout {
    /// Value that disables a bound
    pub const MAX: u32 = u32::MAX;

    pub fn new(
        inter_byte: u32,
        read_constant: u32,
        read_multiplier: u32,
        write_constant: u32,
        write_multiplier: u32,
    ) -> Self {
        Self {
            inter_byte,
            read_constant,
            read_multiplier,
            write_constant,
            write_multiplier,
        }
    }

    /// Same constant for reads and writes, no per-byte or inter-byte terms
    pub fn simple(ms: u32) -> Self {
        Self::new(Self::MAX, ms, 0, ms, 0)
    }

    /// Total time allowed for reading `len` bytes
    pub fn read_budget(&self, len: usize) -> Duration {
        Self::budget(self.read_constant, self.read_multiplier, len)
    }

    /// Total time allowed for writing `len` bytes
    pub fn write_budget(&self, len: usize) -> Duration {
        Self::budget(self.write_constant, self.write_multiplier, len)
    }

    /// Longest silence tolerated between bytes, if bounded
    pub fn inter_byte_gap(&self) -> Option<Duration> {
        if self.inter_byte == Self::MAX {
            None
        } else {
            Some(Duration::from_millis(self.inter_byte as u64))
        }
    }

    fn budget(constant: u32, multiplier: u32, len: usize) -> Duration {
        let per_byte = (multiplier as u64).saturating_mul(len as u64);
        Duration::from_millis((constant as u64).saturating_add(per_byte))
    }
}

impl Default for Timeout {
    fn default() -> Self {
        Self::simple(crate::constants::OPEN_TIMEOUT_MS)
    }
}
