//! Host-side helper for driving an ESP32 running the ESP-AT firmware.
//!
//! Commands are written fire-and-forget through a [`CommandSender`], while a
//! background [`LineReader`] drains the same link and surfaces every line the
//! module sends back.
//!
//! # Features
//!
//! - `serial` - Serial port transport for desktop using serialport crate
//!
//! # Example
//!
//! ```ignore
//! use esp32_at_host::{CommandSender, SenderConfig, SerialTransport};
//! use std::time::Duration;
//!
//! let transport = SerialTransport::new("/dev/ttyUSB0", 115200)?;
//! let config = SenderConfig::new()
//!     .with_debug(true)
//!     .with_delay_after_send(Duration::from_millis(500));
//! let mut esp = CommandSender::new(transport, config)?;
//!
//! esp.set_wifi_mode(1, 0)?;
//! esp.connect_access_point("Giovani", "qwertyuiop", None)?;
//! esp.shutdown();
//! ```

mod command;
mod config;
mod line_reader;
mod sender;
mod transport;
mod types;

#[cfg(feature = "serial")]
mod serial;

// Re-exports
pub use command::{AtCommand, AtCommandName};
pub use config::SenderConfig;
pub use line_reader::{LineBuffer, LineHandler, LineReader};
pub use sender::CommandSender;
pub use transport::AtTransport;
pub use types::{AtError, ReaderState, WifiMode};

#[cfg(feature = "serial")]
pub use serial::SerialTransport;
