//! AT command names and their wire format

use crate::types::{AtError, WifiMode};

/// Every AT command name this crate knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtCommandName {
    /// AT+GMR
    Version,
    /// AT+CWMODE=<mode>[,<auto_connect>]
    WifiMode,
    /// AT+CWJAP=[<"ssid">],[<"pwd">][,<"bssid">][,<pci_en>][,<reconn_interval>][,<listen_interval>][,<scan_mode>][,<jap_timeout>][,<pmf>]
    JoinAccessPoint,
    /// AT+CWLAPOPT=<reserved>,<print mask>[,<rssi filter>][,<authmode mask>]
    ListAccessPointsOptions,
    /// AT+CWLAP=[<"ssid">][,<"mac">][,<channel>][,<scan_type>][,<scan_time_min>][,<scan_time_max>][,<ext_channel_bitmap>]
    ListAccessPoints,
    /// AT+DRVADC=<channel>,<atten>
    ReadAdc,
    /// AT+HTTPCLIENT=<opt>,<content-type>,<"url">,[<"host">],[<"path">],<transport_type>[,<"data">][,<"http_req_header">][...]
    HttpClient,
}

impl AtCommandName {
    pub const fn as_str(self) -> &'static str {
        match self {
            AtCommandName::Version => "AT+GMR",
            AtCommandName::WifiMode => "AT+CWMODE",
            AtCommandName::JoinAccessPoint => "AT+CWJAP",
            AtCommandName::ListAccessPointsOptions => "AT+CWLAPOPT",
            AtCommandName::ListAccessPoints => "AT+CWLAP",
            AtCommandName::ReadAdc => "AT+DRVADC",
            AtCommandName::HttpClient => "AT+HTTPCLIENT",
        }
    }
}

/// A fully parameterized command, ready to be rendered to its wire text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AtCommand<'a> {
    GetVersion,
    QueryConnectedAccessPoint,
    SetWifiMode {
        mode: WifiMode,
        auto_connect: bool,
    },
    ConnectAccessPoint {
        ssid: &'a str,
        password: &'a str,
        /// Appended as-is, without quotes
        mac: Option<&'a str>,
    },
    SetListOptions {
        print_mask: u16,
    },
    ListAccessPoints,
}

impl AtCommand<'_> {
    /// Print mask with every `AT+CWLAP` field enabled
    pub const PRINT_MASK_ALL: u16 = 0x7FF;

    pub fn name(&self) -> AtCommandName {
        match self {
            AtCommand::GetVersion => AtCommandName::Version,
            AtCommand::QueryConnectedAccessPoint | AtCommand::ConnectAccessPoint { .. } => {
                AtCommandName::JoinAccessPoint
            }
            AtCommand::SetWifiMode { .. } => AtCommandName::WifiMode,
            AtCommand::SetListOptions { .. } => AtCommandName::ListAccessPointsOptions,
            AtCommand::ListAccessPoints => AtCommandName::ListAccessPoints,
        }
    }

    /// Render the command text, without the `\r\n` terminator.
    ///
    /// Quoted string fields get the firmware's backslash escaping for `\`, `"` and `,`.
    /// Line breaks cannot be escaped and are rejected.
    pub fn render(&self) -> Result<String, AtError> {
        let name = self.name().as_str();

        let rendered = match self {
            AtCommand::GetVersion | AtCommand::ListAccessPoints => name.to_string(),
            AtCommand::QueryConnectedAccessPoint => format!("{}?", name),
            AtCommand::SetWifiMode { mode, auto_connect } => {
                format!("{}={},{}", name, *mode as u8, u8::from(*auto_connect))
            }
            AtCommand::ConnectAccessPoint {
                ssid,
                password,
                mac,
            } => {
                let mut cmd = format!(
                    "{}=\"{}\",\"{}\"",
                    name,
                    escape_field("ssid", ssid)?,
                    escape_field("password", password)?
                );
                if let Some(mac) = mac {
                    reject_line_breaks("mac", mac)?;
                    cmd.push(',');
                    cmd.push_str(mac);
                }
                cmd
            }
            AtCommand::SetListOptions { print_mask } => format!("{}=,{}", name, print_mask),
        };

        Ok(rendered)
    }
}

fn reject_line_breaks(field: &str, value: &str) -> Result<(), AtError> {
    if value.contains(['\r', '\n']) {
        return Err(AtError::InvalidParameter(format!(
            "{} must not contain line breaks",
            field
        )));
    }
    Ok(())
}

fn escape_field(field: &str, value: &str) -> Result<String, AtError> {
    reject_line_breaks(field, value)?;

    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '"' | ',') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    Ok(escaped)
}
