//! Error types for catalog requests and response decoding.

use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Every failure a catalog operation can surface.
///
/// Transport and decode failures are kept apart so an application can tell
/// "the catalog is unreachable" from "the catalog answered with something
/// unexpected".
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl Error {
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode(_))
    }

    /// True when the catalog answered 404 for the requested resource.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Transport(e) => e.is_not_found(),
            _ => false,
        }
    }
}

/// The HTTP request did not produce a successful response.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("Request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned {}", describe_status(.status))]
    Status { url: String, status: StatusCode },
}

impl TransportError {
    /// The HTTP status of the response, if one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            TransportError::Request { source, .. } => source.status(),
            TransportError::Client(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

fn describe_status(status: &StatusCode) -> String {
    match *status {
        StatusCode::NOT_FOUND => "HTTP 404: the requested resource was not found".to_string(),
        StatusCode::TOO_MANY_REQUESTS => "HTTP 429: too many requests".to_string(),
        StatusCode::FORBIDDEN => "HTTP 403: access to this resource is forbidden".to_string(),
        s if s.is_server_error() => format!("HTTP {}: catalog server error", s.as_u16()),
        s => format!("HTTP {}", s.as_u16()),
    }
}

/// The response body did not have the expected shape.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Failed to parse JSON response from catalog")]
    Json(#[from] serde_json::Error),

    #[error("Invalid ISO-8601 timestamp '{value}'")]
    Timestamp { value: String },
}
