//! In-memory stand-ins for a serial port.

#![allow(dead_code)]

use serial_example::{Backend, Delay, Link, PortListing, PortSettings, Result, Timeout};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

/// Everything a [`LoopbackLink`] saw
#[derive(Debug, Default)]
pub struct LinkLog {
    pub pending: VecDeque<u8>,
    pub writes: Vec<Vec<u8>>,
    pub reads: Vec<usize>,
    pub timeouts: Vec<Timeout>,
    /// Drop writes instead of echoing them
    pub mute: bool,
}

/// Echoes every write back to the next reads, like a wired loopback
#[derive(Debug, Clone)]
pub struct LoopbackLink {
    pub log: Rc<RefCell<LinkLog>>,
    pub open: bool,
}

impl LoopbackLink {
    pub fn new() -> Self {
        Self {
            log: Rc::new(RefCell::new(LinkLog::default())),
            open: true,
        }
    }
}

impl Link for LoopbackLink {
    fn is_open(&self) -> bool {
        self.open
    }

    fn set_timeout(&mut self, timeout: Timeout) -> Result<()> {
        self.log.borrow_mut().timeouts.push(timeout);
        Ok(())
    }

    fn write(&mut self, data: &[u8]) -> Result<usize> {
        let mut log = self.log.borrow_mut();
        log.writes.push(data.to_vec());
        if !log.mute {
            log.pending.extend(data.iter().copied());
        }
        Ok(data.len())
    }

    fn read(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut log = self.log.borrow_mut();
        log.reads.push(len);
        let take = len.min(log.pending.len());
        Ok(log.pending.drain(..take).collect())
    }
}

/// Hands out a shared [`LoopbackLink`] and remembers every open
pub struct RecordingBackend {
    pub ports: Vec<PortListing>,
    pub link: LoopbackLink,
    pub opened: RefCell<Vec<PortSettings>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self {
            ports: vec![
                PortListing::new("/dev/ttyS0", "n/a", "n/a"),
                PortListing::new("/dev/ttyUSB0", "FT232R USB UART", "USB VID:PID=0403:6001 SNR=A50285BI"),
            ],
            link: LoopbackLink::new(),
            opened: RefCell::new(Vec::new()),
        }
    }

    pub fn closed() -> Self {
        let mut backend = Self::new();
        backend.link.open = false;
        backend
    }

    pub fn log(&self) -> std::cell::Ref<'_, LinkLog> {
        self.link.log.borrow()
    }
}

impl Backend for RecordingBackend {
    type Link = LoopbackLink;

    fn list_ports(&self) -> Result<Vec<PortListing>> {
        Ok(self.ports.clone())
    }

    fn open(&self, settings: &PortSettings) -> Result<LoopbackLink> {
        self.opened.borrow_mut().push(settings.clone());
        Ok(self.link.clone())
    }
}

/// Records pauses instead of sleeping
#[derive(Debug, Clone, Default)]
pub struct RecordingDelay {
    pub pauses: Rc<RefCell<Vec<Duration>>>,
}

impl Delay for RecordingDelay {
    fn pause(&mut self, duration: Duration) {
        self.pauses.borrow_mut().push(duration);
    }
}

pub fn args(list: &[&str]) -> Vec<String> {
    std::iter::once("test_serial")
        .chain(list.iter().copied())
        .map(String::from)
        .collect()
}
