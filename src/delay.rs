use std::thread;
use std::time::Duration;

/// Blocking pause, injected so callers can run without real sleeps
pub trait Delay {
    fn pause(&mut self, duration: Duration);
}

/// Sleeps the current thread
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadDelay;

impl Delay for ThreadDelay {
    fn pause(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}
