//! Bridge error types with stable numeric codes.
//!
//! [`BridgeError`] is the central error type for the client. Each variant
//! maps to a numeric code that is attached to log records so failures can
//! be grouped without parsing messages.

use tokio_tungstenite::tungstenite;

/// Client-side error enum.
///
/// # Error Code Ranges
///
/// | Range     | Category      |
/// |-----------|---------------|
/// | 1000–1999 | Configuration |
/// | 2000–2999 | Transport     |
/// | 3000–3999 | Local I/O     |
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// The origin URL could not be parsed or has no host.
    #[error("invalid origin url: {0}")]
    InvalidOrigin(String),

    /// The origin URL uses a scheme with no WebSocket counterpart.
    #[error("unsupported origin scheme: {0}")]
    UnsupportedScheme(String),

    /// WebSocket handshake or frame I/O failed.
    #[error("transport error: {0}")]
    Transport(Box<tungstenite::Error>),

    /// An event could not be encoded or decoded.
    #[error("codec error: {0}")]
    Codec(#[from] serde_json::Error),

    /// Reading the console or writing the display failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl BridgeError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidOrigin(_) => 1001,
            Self::UnsupportedScheme(_) => 1002,
            Self::Transport(_) => 2001,
            Self::Codec(_) => 2002,
            Self::Io(_) => 3001,
        }
    }

    /// Returns `true` for errors raised while validating configuration.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::InvalidOrigin(_) | Self::UnsupportedScheme(_))
    }
}

impl From<tungstenite::Error> for BridgeError {
    fn from(err: tungstenite::Error) -> Self {
        Self::Transport(Box::new(err))
    }
}
