//! Transport-level error types for the RingPlus client.
//!
//! A [`TransportError`] means no HTTP response was received at all: DNS
//! failure, refused connection, TLS failure, timeout, or a body that could not
//! be read. Responses with a non-2xx status are *not* transport errors; they
//! are turned into [`ApiError`](crate::rest::ApiError) by the binder.
//!
//! # Example
//!
//! ```rust
//! use ringplus::clients::{TransportError, TransportErrorKind};
//!
//! let error = TransportError::new(TransportErrorKind::Timeout, "request timed out");
//! assert!(error.is_timeout());
//! assert_eq!(error.to_string(), "timeout: request timed out");
//! ```

use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Broad category of a transport failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// The request did not complete within the configured timeout.
    Timeout,
    /// A connection could not be established.
    Connect,
    /// The request could not be built or the body could not be read.
    Request,
    /// Anything else.
    Other,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Timeout => "timeout",
            Self::Connect => "connect",
            Self::Request => "request",
            Self::Other => "transport",
        })
    }
}

/// Error returned when an HTTP exchange fails before a response arrives.
///
/// The binder treats every transport error as retryable for GET requests.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct TransportError {
    kind: TransportErrorKind,
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl TransportError {
    /// Creates a transport error without an underlying cause.
    #[must_use]
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Attaches the underlying cause.
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the failure category.
    #[must_use]
    pub const fn kind(&self) -> TransportErrorKind {
        self.kind
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns `true` if the request timed out.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        self.kind == TransportErrorKind::Timeout
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        let kind = if error.is_timeout() {
            TransportErrorKind::Timeout
        } else if error.is_connect() {
            TransportErrorKind::Connect
        } else if error.is_request() || error.is_body() || error.is_decode() {
            TransportErrorKind::Request
        } else {
            TransportErrorKind::Other
        };
        Self::new(kind, error.to_string()).with_source(error)
    }
}
