//! Configuration error types for the RingPlus client.
//!
//! All configuration constructors return `Result<T, ConfigError>` so invalid
//! settings are rejected when the client is built, not when the first request
//! goes out.
//!
//! # Example
//!
//! ```rust
//! use ringplus::{ClientId, ConfigError};
//!
//! let result = ClientId::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyClientId)));
//! ```

use thiserror::Error;

/// Errors that can occur while building client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// OAuth client id cannot be empty.
    #[error("Client id cannot be empty. Please provide the OAuth client id issued by RingPlus.")]
    EmptyClientId,

    /// OAuth client secret cannot be empty.
    #[error("Client secret cannot be empty. Please provide the OAuth client secret issued by RingPlus.")]
    EmptyClientSecret,

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Expected format: 'v1' or '1'.")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// Host URL is invalid.
    #[error("Invalid host URL '{url}'. Please provide a host name (e.g., 'api.ringplus.net') or a URL with scheme.")]
    InvalidHostUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Redirect URI is invalid.
    #[error("Invalid redirect URI '{uri}'. Expected an absolute http(s) URL.")]
    InvalidRedirectUri {
        /// The invalid URI that was provided.
        uri: String,
    },

    /// Proxy URL was rejected by the HTTP stack.
    #[error("Invalid proxy URL '{url}': {reason}")]
    InvalidProxy {
        /// The proxy URL that was provided.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {reason}")]
    HttpClient {
        /// Why construction failed.
        reason: String,
    },
}
