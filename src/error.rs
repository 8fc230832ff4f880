use std::error::Error;
use std::fmt;

/// Error type for everything outside the realtime path
#[derive(Debug)]
pub enum PocketError {
    /// Settings could not be loaded or failed validation
    Config(String),
    /// Error when talking to a MIDI device
    Midi(String),
    /// No MIDI input port matched the requested name
    DeviceNotFound(String),
    /// The host asked us to prepare with an unusable sample rate
    InvalidSampleRate(f64),
    /// A worker thread could not be spawned or joined
    Thread(String),
    Io(std::io::Error),
}

impl fmt::Display for PocketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PocketError::Config(msg) => write!(f, "configuration error: {}", msg),
            PocketError::Midi(msg) => write!(f, "MIDI error: {}", msg),
            PocketError::DeviceNotFound(name) => {
                write!(f, "MIDI input device '{}' not found", name)
            }
            PocketError::InvalidSampleRate(rate) => {
                write!(f, "invalid sample rate: {} (must be > 0)", rate)
            }
            PocketError::Thread(msg) => write!(f, "thread error: {}", msg),
            PocketError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl Error for PocketError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PocketError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PocketError {
    fn from(e: std::io::Error) -> Self {
        PocketError::Io(e)
    }
}

impl From<::config::ConfigError> for PocketError {
    fn from(e: ::config::ConfigError) -> Self {
        PocketError::Config(e.to_string())
    }
}

impl From<midir::InitError> for PocketError {
    fn from(e: midir::InitError) -> Self {
        PocketError::Midi(e.to_string())
    }
}

impl<T> From<midir::ConnectError<T>> for PocketError {
    fn from(e: midir::ConnectError<T>) -> Self {
        PocketError::Midi(e.kind().to_string())
    }
}

/// Result type for fallible operations in this crate
pub type Result<T> = std::result::Result<T, PocketError>;
