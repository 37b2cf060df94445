//! Error type definitions for the M3U catalog
//!
//! The parser itself never fails; these types cover everything around it:
//! fetching playlist text, reading configuration and serving the HTTP API.

use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Playlist retrieval errors
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Web layer errors
    #[error("Web error: {0}")]
    Web(#[from] WebError),

    /// Validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Local file errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while retrieving playlist text
#[derive(Error, Debug)]
pub enum SourceError {
    /// Request exceeded the configured timeout
    #[error("Connection timeout: {url}")]
    Timeout { url: String },

    /// Connection could not be established or was dropped
    #[error("Connection failed: {url} - {message}")]
    Connection { url: String, message: String },

    /// Non-success HTTP status from the remote server
    #[error("HTTP error: {status} - {message}")]
    Http { status: u16, message: String },

    /// Body could not be decompressed or decoded
    #[error("Decode error: {message}")]
    Decode { message: String },

    /// Body larger than the configured limit
    #[error("Playlist too large: {size} bytes (max: {max_size})")]
    TooLarge { size: usize, max_size: usize },

    /// Only http and https locations can be fetched
    #[error("Unsupported URL scheme: {url}")]
    UnsupportedScheme { url: String },
}

/// Web layer specific errors
#[derive(Error, Debug)]
pub enum WebError {
    /// Invalid request format
    #[error("Invalid request: {field} - {message}")]
    InvalidRequest { field: String, message: String },
}

/// Convenience methods for creating common error types
impl AppError {
    /// Create a validation error with a custom message
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

impl SourceError {
    /// Create a decode error
    pub fn decode<S: Into<String>>(message: S) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a connection error
    pub fn connection<U: Into<String>, M: Into<String>>(url: U, message: M) -> Self {
        Self::Connection {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Whether a retry over another transport might succeed
    pub fn is_transport_failure(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Connection { .. })
    }
}

impl WebError {
    /// Create an invalid request error for a named field
    pub fn invalid_request<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        Self::InvalidRequest {
            field: field.into(),
            message: message.into(),
        }
    }
}
