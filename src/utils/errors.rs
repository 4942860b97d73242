//! Error handling for BookHotel
//!
//! This module defines the main error types used throughout the client
//! and the view-bound message every failure is reduced to for display.

use std::collections::BTreeMap;
use std::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the BookHotel client
#[derive(Error, Debug)]
pub enum BookHotelError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Geocoding error: {0}")]
    Geocoding(#[from] GeocodingError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration source error: {0}")]
    ConfigSource(#[from] config::ConfigError),

    #[error("Invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("Unknown route: {0}")]
    UnknownRoute(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Session file encode error: {0}")]
    SessionEncode(#[from] toml::ser::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Failure reported by the booking API
///
/// `payload` carries the server's `error` field verbatim.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("HTTP {status}: {payload}")]
pub struct ApiError {
    pub status: u16,
    pub payload: ErrorPayload,
}

/// The `error` field of an API error body
///
/// Login and lookup failures send a plain string; form submissions send a
/// map of field name to message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorPayload {
    Message(String),
    Fields(BTreeMap<String, String>),
}

impl ErrorPayload {
    /// Message for a single field, if the server reported one
    pub fn field(&self, name: &str) -> Option<&str> {
        match self {
            ErrorPayload::Message(_) => None,
            ErrorPayload::Fields(fields) => fields.get(name).map(String::as_str),
        }
    }

    pub fn is_field_errors(&self) -> bool {
        matches!(self, ErrorPayload::Fields(_))
    }
}

impl fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorPayload::Message(message) => write!(f, "{}", message),
            ErrorPayload::Fields(fields) => {
                let joined = fields
                    .iter()
                    .map(|(field, message)| format!("{}: {}", field, message))
                    .collect::<Vec<_>>()
                    .join("; ");
                write!(f, "{}", joined)
            }
        }
    }
}

/// Envelope of an API error body
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorPayload,
}

/// Geocoding endpoint specific errors
#[derive(Error, Debug)]
pub enum GeocodingError {
    #[error("Geocoding request failed: {0}")]
    RequestFailed(String),

    #[error("Geocoding request timed out")]
    Timeout,

    #[error("Geocoder returned status {status}: {message}")]
    Status { status: String, message: String },

    #[error("Invalid geocoding response: {0}")]
    InvalidResponse(String),
}

/// Result type alias for BookHotel operations
pub type Result<T> = std::result::Result<T, BookHotelError>;

/// Result type alias for geocoding operations
pub type GeocodingResult<T> = std::result::Result<T, GeocodingError>;

impl BookHotelError {
    /// The string a view binds for display
    ///
    /// API failures surface the server's `error` field unchanged; everything
    /// else falls back to the error's own message.
    pub fn display_message(&self) -> String {
        match self {
            BookHotelError::Api(api) => api.payload.to_string(),
            other => other.to_string(),
        }
    }

    /// The server payload, when the failure came from the API
    pub fn payload(&self) -> Option<&ErrorPayload> {
        match self {
            BookHotelError::Api(api) => Some(&api.payload),
            _ => None,
        }
    }

    /// HTTP status reported by the API, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            BookHotelError::Api(api) => Some(api.status),
            BookHotelError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if the error is recoverable by trying again later
    pub fn is_recoverable(&self) -> bool {
        match self {
            BookHotelError::Api(api) => api.status >= 500,
            BookHotelError::Geocoding(GeocodingError::Timeout) => true,
            BookHotelError::Geocoding(_) => false,
            BookHotelError::Http(e) => e.is_timeout() || e.is_connect(),
            BookHotelError::Io(_) => true,
            _ => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            BookHotelError::Config(_) => ErrorSeverity::Critical,
            BookHotelError::ConfigSource(_) => ErrorSeverity::Critical,
            BookHotelError::InvalidToken(_) => ErrorSeverity::Warning,
            BookHotelError::InvalidInput(_) => ErrorSeverity::Info,
            BookHotelError::Api(api) if api.status < 500 => ErrorSeverity::Info,
            BookHotelError::Geocoding(_) => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
