/// Error returned by transport operations.
///
/// I/O and JSON failures are passed through unchanged so callers can inspect
/// the underlying error (e.g. `io::ErrorKind::NotFound` for a log file that
/// was never written).
#[derive(thiserror::Error, Debug)]
pub enum TransportError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Parse(#[from] serde_json::Error),

    #[error("operation not supported by this transport: {0}")]
    Unsupported(&'static str),
}

impl TransportError {
    /// The I/O error kind, if this is an I/O failure.
    pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
        match self {
            TransportError::Io(e) => Some(e.kind()),
            _ => None,
        }
    }
}

/// Error type returned when building a transport from configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("unknown color {color:?} configured for level {level:?}")]
    UnknownColor { level: String, color: String },

    #[error("unknown transport format {0:?}, expected \"json\" or \"text\"")]
    UnknownFormat(String),

    #[error("unknown JSON framing {0:?}, expected \"comma-terminated\" or \"ndjson\"")]
    UnknownFraming(String),

    #[error("prettyprint cannot be combined with ndjson framing")]
    PrettyNdjson,

    #[error("invalid value {value:?} for {key}")]
    InvalidEnv { key: &'static str, value: String },

    #[error("invalid configuration object: {0}")]
    Json(#[from] serde_json::Error),
}
