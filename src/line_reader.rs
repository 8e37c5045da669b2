use log::{debug, error, info};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::transport::AtTransport;
use crate::types::{AtError, ReaderState};

/// Callback receiving every line surfaced by the reader
pub type LineHandler = Box<dyn FnMut(&str) + Send + 'static>;

/// Splits an incoming byte stream into trimmed text lines.
///
/// Bytes after the last `\n` are kept until a later push completes the line,
/// up to [`LineBuffer::MAX_PENDING`] bytes.
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    /// Longest unterminated line kept; anything longer is dropped
    pub const MAX_PENDING: usize = 4096;

    pub fn new() -> Self {
        Self::default()
    }

    /// Append received bytes and return every line they complete.
    ///
    /// Invalid UTF-8 is dropped. Lines that are empty after trimming, such as the
    /// blank separators the firmware prints around replies, are skipped and never
    /// reach the log or the line handler.
    pub fn push(&mut self, data: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(data);

        let mut lines = Vec::new();
        while let Some(line_end) = self.pending.iter().position(|&b| b == b'\n') {
            let line = decode_lossy(&self.pending[..line_end]);
            self.pending.drain(..=line_end);

            let line = line.trim();
            if !line.is_empty() {
                lines.push(line.to_string());
            }
        }

        if self.pending.len() > Self::MAX_PENDING {
            debug!(
                "Dropping {} unterminated bytes, no line break within {} bytes",
                self.pending.len(),
                Self::MAX_PENDING
            );
            self.pending.clear();
        }
        lines
    }

    /// Bytes received so far that are not yet terminated
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }
}

fn decode_lossy(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

struct ReaderShared {
    stop_flag: AtomicBool,
    running: AtomicBool,
}

/// Background thread draining a transport and surfacing whole lines.
///
/// It keeps running until asked to stop or until the transport reports an
/// error, which is taken as a disconnection. It never restarts on its own.
pub struct LineReader {
    shared: Arc<ReaderShared>,
    thread_handle: Option<JoinHandle<()>>,
}

impl LineReader {
    const READ_CHUNK: usize = 256;

    /// Spawn the reader thread on `transport`
    ///
    /// # Arguments
    /// * `debug` - Log each received line as `R:<line>`
    /// * `poll_timeout` - Upper bound for one blocking read, also bounds how long `stop` takes
    /// * `handler` - Optional callback for every surfaced line
    pub fn spawn<T: AtTransport>(
        mut transport: T,
        debug: bool,
        poll_timeout: Duration,
        mut handler: Option<LineHandler>,
    ) -> Result<Self, AtError> {
        let shared = Arc::new(ReaderShared {
            stop_flag: AtomicBool::new(false),
            running: AtomicBool::new(true),
        });
        let thread_shared = Arc::clone(&shared);
        let timeout_ms = poll_timeout.as_millis().clamp(1, u32::MAX as u128) as u32;

        let thread_handle = thread::Builder::new()
            .name("at-line-reader".to_string())
            .spawn(move || {
                let mut lines = LineBuffer::new();
                let mut buf = [0u8; Self::READ_CHUNK];

                while !thread_shared.stop_flag.load(Ordering::Relaxed) {
                    let received = transport
                        .bytes_available()
                        .map(|available| available.clamp(1, Self::READ_CHUNK))
                        .and_then(|wanted| transport.read(&mut buf[..wanted], timeout_ms));

                    match received {
                        Ok(0) => {}
                        Ok(bytes_read) => {
                            debug!("Received {} bytes: {:02X?}", bytes_read, &buf[..bytes_read]);
                            for line in lines.push(&buf[..bytes_read]) {
                                if debug {
                                    info!("R:{}", line);
                                }
                                if let Some(handler) = handler.as_mut() {
                                    handler(line.as_str());
                                }
                            }
                        }
                        Err(e) => {
                            error!("Serial disconnected: {:?}", e);
                            break;
                        }
                    }
                }

                thread_shared.running.store(false, Ordering::Release);
            })
            .map_err(|e| {
                shared.running.store(false, Ordering::Release);
                AtError::Spawn(format!("{:?}", e))
            })?;

        Ok(Self {
            shared,
            thread_handle: Some(thread_handle),
        })
    }

    pub fn state(&self) -> ReaderState {
        if self.is_running() {
            ReaderState::Running
        } else {
            ReaderState::Stopped
        }
    }

    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::Acquire)
    }

    /// Ask the thread to stop after its current read
    pub fn stop(&self) {
        self.shared.stop_flag.store(true, Ordering::Relaxed);
    }

    /// Stop the thread and wait for it to finish
    pub fn join(mut self) {
        self.stop();
        if let Some(handle) = self.thread_handle.take() {
            if handle.join().is_err() {
                error!("Line reader thread panicked");
            }
        }
    }
}

impl Drop for LineReader {
    fn drop(&mut self) {
        // Not joined here: the thread exits within one poll timeout
        self.stop();
    }
}
