//! Error types for the Gekko API client.
//!
//! # Design
//! Callers see only two kinds of failure: `Validation` and `Runtime`. Which
//! kind an operation raises is part of its contract (strategy listing is the
//! only `Runtime` path). The underlying `HttpError` is folded into the message
//! string and not kept as a source.

use thiserror::Error;

/// Errors returned by `GekkoClient` operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GekkoError {
    /// Rejected input or a failed exchange-info / trading request.
    #[error("{0}")]
    Validation(String),

    /// A failed strategy listing.
    #[error("{0}")]
    Runtime(String),
}

impl GekkoError {
    pub fn message(&self) -> &str {
        match self {
            GekkoError::Validation(msg) | GekkoError::Runtime(msg) => msg,
        }
    }
}

/// What went wrong during a single HTTP round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpError {
    /// The request never produced a response (DNS, refused connection,
    /// timeout, broken body).
    #[error("{0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The body was not a JSON object.
    #[error("invalid JSON response: {0}")]
    Decode(String),
}
