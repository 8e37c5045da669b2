use log::{debug, error, info};

use crate::command::{AtCommand, AtCommandName};
use crate::config::SenderConfig;
use crate::line_reader::{LineHandler, LineReader};
use crate::transport::AtTransport;
use crate::types::{AtError, ReaderState, WifiMode};

/// Fire-and-forget AT command sender.
///
/// Creating a sender starts a [`LineReader`] on a cloned handle of the same
/// transport. Commands are written and never matched to their replies: a
/// successful call only means the bytes were handed to the transport.
pub struct CommandSender<T: AtTransport> {
    transport: T,
    config: SenderConfig,
    reader: Option<LineReader>,
}

impl<T: AtTransport> CommandSender<T> {
    const TERMINATOR: &'static str = "\r\n";

    /// Create a new sender and start its background line reader
    pub fn new(transport: T, config: SenderConfig) -> Result<Self, AtError> {
        Self::start(transport, config, None)
    }

    /// Like [`CommandSender::new`], also passing every received line to `handler`
    pub fn with_line_handler<F>(transport: T, config: SenderConfig, handler: F) -> Result<Self, AtError>
    where
        F: FnMut(&str) + Send + 'static,
    {
        Self::start(transport, config, Some(Box::new(handler)))
    }

    fn start(transport: T, config: SenderConfig, handler: Option<LineHandler>) -> Result<Self, AtError> {
        let reader_transport = transport
            .try_clone()
            .map_err(|e| AtError::Transport(format!("{:?}", e)))?;
        let reader = LineReader::spawn(reader_transport, config.debug, config.poll_timeout, handler)?;

        Ok(Self {
            transport,
            config,
            reader: Some(reader),
        })
    }

    pub fn config(&self) -> &SenderConfig {
        &self.config
    }

    /// State of the background line reader
    pub fn reader_state(&self) -> ReaderState {
        self.reader
            .as_ref()
            .map_or(ReaderState::Stopped, LineReader::state)
    }

    /// Write `cmd` followed by `\r\n`, then wait the configured delay
    pub fn send_command(&mut self, cmd: &str) -> Result<(), AtError> {
        let full_cmd = format!("{}{}", cmd, Self::TERMINATOR);
        let written = self
            .transport
            .write(full_cmd.as_bytes())
            .map_err(|e| AtError::Transport(format!("{:?}", e)))?;
        debug!("Wrote {} bytes", written);

        if written != full_cmd.len() {
            return Err(AtError::Transport(format!(
                "Short write: {} of {} bytes",
                written,
                full_cmd.len()
            )));
        }

        if self.config.debug {
            info!(">>> Sent: {}", cmd);
        }

        if !self.config.delay_after_send.is_zero() {
            std::thread::sleep(self.config.delay_after_send);
        }
        Ok(())
    }

    /// Render and send a command
    pub fn send(&mut self, command: &AtCommand<'_>) -> Result<(), AtError> {
        let cmd = command.render().inspect_err(|e| error!("Error: {}", e))?;
        self.send_command(&cmd)
    }

    /// Query the AT firmware version
    pub fn get_version(&mut self) -> Result<(), AtError> {
        self.send(&AtCommand::GetVersion)
    }

    /// Query the access point the module is currently joined to
    pub fn get_connected_access_point(&mut self) -> Result<(), AtError> {
        self.send(&AtCommand::QueryConnectedAccessPoint)
    }

    /// Join an access point
    ///
    /// # Arguments
    /// * `ssid` - Network name, quoted and escaped on the wire
    /// * `password` - Network key, quoted and escaped on the wire
    /// * `mac` - Optional BSSID, appended without quotes
    pub fn connect_access_point(
        &mut self,
        ssid: &str,
        password: &str,
        mac: Option<&str>,
    ) -> Result<(), AtError> {
        self.send(&AtCommand::ConnectAccessPoint {
            ssid,
            password,
            mac,
        })
    }

    /// Scan for access points, reporting every field.
    ///
    /// Sends the list options first and the scan second; a failed first write
    /// skips the scan.
    pub fn list_available_access_points(&mut self) -> Result<(), AtError> {
        self.send(&AtCommand::SetListOptions {
            print_mask: AtCommand::PRINT_MASK_ALL,
        })?;
        self.send(&AtCommand::ListAccessPoints)
    }

    /// Set the Wi-Fi mode (0-3) and whether to auto-connect (0-1)
    pub fn set_wifi_mode(&mut self, mode: u8, auto_connect: u8) -> Result<(), AtError> {
        let mode = WifiMode::try_from(mode).inspect_err(|e| error!("Error: {}", e))?;

        let auto_connect = match auto_connect {
            0 => false,
            1 => true,
            _ => {
                let err = AtError::InvalidParameter(format!("invalid autoConnect ({})", auto_connect));
                error!("Error: {}", err);
                return Err(err);
            }
        };

        self.send(&AtCommand::SetWifiMode { mode, auto_connect })
    }

    /// Read an ADC channel. Not supported yet.
    pub fn get_adc(&mut self, _channel: u8, _atten: u8) -> Result<(), AtError> {
        Err(AtError::NotImplemented(AtCommandName::ReadAdc.as_str()))
    }

    /// Issue an HTTP client request. Only the method (1-5) is checked; the
    /// request itself is not supported yet.
    pub fn send_http_client_request(&mut self, method: u8, _content: &str) -> Result<(), AtError> {
        const MIN_METHOD: u8 = 1;
        const MAX_METHOD: u8 = 5;

        if !(MIN_METHOD..=MAX_METHOD).contains(&method) {
            let err = AtError::InvalidParameter(format!("invalid method ({})", method));
            error!("Error: {}", err);
            return Err(err);
        }

        Err(AtError::NotImplemented(AtCommandName::HttpClient.as_str()))
    }

    /// Stop the line reader and wait for its thread to exit
    pub fn shutdown(mut self) {
        if let Some(reader) = self.reader.take() {
            reader.join();
        }
    }
}
