//! Sender configuration

use std::time::Duration;

/// Settings for a [`CommandSender`](crate::CommandSender), fixed for its lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderConfig {
    /// Log every sent and received line
    pub debug: bool,
    /// Pause after each write, giving the module time to answer
    pub delay_after_send: Duration,
    /// Upper bound for a single blocking read in the line reader
    pub poll_timeout: Duration,
}

impl SenderConfig {
    const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_millis(100);

    pub fn new() -> Self {
        Self {
            debug: false,
            delay_after_send: Duration::ZERO,
            poll_timeout: Self::DEFAULT_POLL_TIMEOUT,
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_delay_after_send(mut self, delay: Duration) -> Self {
        self.delay_after_send = delay;
        self
    }

    pub fn with_poll_timeout(mut self, timeout: Duration) -> Self {
        self.poll_timeout = timeout;
        self
    }
}

impl Default for SenderConfig {
    fn default() -> Self {
        Self::new()
    }
}
