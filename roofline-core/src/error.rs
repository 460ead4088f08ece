//! Error types for Roofline core.

use std::{error::Error, fmt, io};

/// Error type for the layers around the estimate pipeline.
///
/// The pipeline itself never fails; these variants cover loading, decoding,
/// and the opt-in validation of geometry and pricing configuration.
#[derive(Debug)]
pub enum RooflineError {
    /// An underlying I/O error.
    Io(io::Error),
    /// A geometry or insights document could not be decoded.
    Json(serde_json::Error),
    /// Geometry rejected by validation.
    InvalidGeometry(String),
    /// Pricing rates rejected by validation.
    InvalidRates(String),
    /// The geometry provider returned no usable roof data.
    Unavailable(String),
    /// A catch-all error with a message.
    Other(String),
}

impl fmt::Display for RooflineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io error: {err}"),
            Self::Json(err) => write!(f, "json error: {err}"),
            Self::InvalidGeometry(message) => write!(f, "invalid geometry: {message}"),
            Self::InvalidRates(message) => write!(f, "invalid rates: {message}"),
            Self::Unavailable(message) => write!(f, "geometry unavailable: {message}"),
            Self::Other(message) => write!(f, "{message}"),
        }
    }
}

impl Error for RooflineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for RooflineError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for RooflineError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Convenience result type for Roofline core.
pub type Result<T> = std::result::Result<T, RooflineError>;
