//! Error type definitions
//!
//! Each pipeline stage owns one error enum. `AppError` wraps them so a
//! handler can propagate any stage failure with `?` and still tell the
//! categories apart when it builds the response.

use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Upstream catalog could not be fetched
    #[error("{0}")]
    Fetch(#[from] FetchError),

    /// Upstream body could not be decoded into channel records
    #[error("{0}")]
    Decode(#[from] DecodeError),

    /// Output document could not be serialized
    #[error("{0}")]
    Render(#[from] RenderError),

    /// Required configuration is missing or invalid
    #[error("{0}")]
    Config(#[from] ConfigError),
}

/// Upstream fetch errors
#[derive(Error, Debug)]
pub enum FetchError {
    /// The HTTP client itself could not be constructed
    #[error("failed to build HTTP client: {message}")]
    Client { message: String },

    /// The request could not be built (bad or empty URL)
    #[error("invalid request for '{url}': {message}")]
    InvalidRequest { url: String, message: String },

    /// Network or transport level failure
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// Upstream answered with a non-success status (only when status checks are enabled)
    #[error("upstream {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// The response body could not be read
    #[error("failed to read response from {url}: {message}")]
    Body { url: String, message: String },
}

/// Channel decoding errors
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Malformed JSON or a structural mismatch against the channel schema
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

/// Output serialization errors
#[derive(Error, Debug)]
pub enum RenderError {
    /// XMLTV serialization failed
    #[error("error marshalling XML: {message}")]
    Xml { message: String },

    /// JSON serialization failed
    #[error("error marshalling JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No upstream catalog URL was configured
    #[error("{variable} environment variable is not set")]
    MissingUpstreamUrl { variable: String },

    /// A configured field path could not be parsed
    #[error("invalid field '{field}': {message}")]
    InvalidField { field: String, message: String },
}

impl FetchError {
    /// Create a transport error
    pub fn transport<U: Into<String>, M: Into<String>>(url: U, message: M) -> Self {
        Self::Transport {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create an invalid request error
    pub fn invalid_request<U: Into<String>, M: Into<String>>(url: U, message: M) -> Self {
        Self::InvalidRequest {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a body read error
    pub fn body<U: Into<String>, M: Into<String>>(url: U, message: M) -> Self {
        Self::Body {
            url: url.into(),
            message: message.into(),
        }
    }
}

impl RenderError {
    /// Create an XML serialization error
    pub fn xml<M: Into<String>>(message: M) -> Self {
        Self::Xml {
            message: message.into(),
        }
    }
}

impl ConfigError {
    /// Create a missing upstream URL error for the given variable name
    pub fn missing_upstream_url<V: Into<String>>(variable: V) -> Self {
        Self::MissingUpstreamUrl {
            variable: variable.into(),
        }
    }

    /// Create an invalid field error
    pub fn invalid_field<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        Self::InvalidField {
            field: field.into(),
            message: message.into(),
        }
    }
}
