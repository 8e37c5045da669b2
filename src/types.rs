//! Types for AT command operations

use std::fmt;

/// Wi-Fi operating mode, as accepted by `AT+CWMODE`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WifiMode {
    /// Wi-Fi RF disabled
    Null = 0,
    Station = 1,
    SoftAp = 2,
    SoftApStation = 3,
}

impl TryFrom<u8> for WifiMode {
    type Error = AtError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(WifiMode::Null),
            1 => Ok(WifiMode::Station),
            2 => Ok(WifiMode::SoftAp),
            3 => Ok(WifiMode::SoftApStation),
            _ => Err(AtError::InvalidParameter(format!("invalid wifi mode ({})", value))),
        }
    }
}

/// State of the background line reader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderState {
    Running,
    Stopped,
}

/// Errors that can occur during AT operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AtError {
    /// Transport layer error (serial port write, clone, etc.)
    Transport(String),
    /// Invalid parameter, rejected before anything was transmitted
    InvalidParameter(String),
    /// Command is declared but has no implementation
    NotImplemented(&'static str),
    /// The line reader thread could not be started
    Spawn(String),
}

impl fmt::Display for AtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AtError::Transport(msg) => write!(f, "transport error: {}", msg),
            AtError::InvalidParameter(msg) => write!(f, "invalid parameter: {}", msg),
            AtError::NotImplemented(cmd) => write!(f, "{} is not implemented", cmd),
            AtError::Spawn(msg) => write!(f, "failed to start line reader: {}", msg),
        }
    }
}

impl std::error::Error for AtError {}
