//! Error types returned by the binder and the API surface.
//!
//! Every call returns [`RingPlusError`]. Its variants tell the caller where
//! the call failed:
//!
//! - [`RingPlusError::Argument`]: the call was rejected before any network I/O
//! - [`RingPlusError::Auth`]: no usable access token, or an OAuth exchange failed
//! - [`RingPlusError::Transport`]: no response arrived (after retries)
//! - [`RingPlusError::Api`]: the server answered with a non-2xx status
//! - [`RingPlusError::RateLimit`]: the server answered with a rate-limit response
//! - [`RingPlusError::Parse`]: the body did not match the declared payload type
//! - [`RingPlusError::Config`]: the client could not be configured
//! - [`RingPlusError::Detached`]: an entity follow-up call had no client
//!
//! # Example
//!
//! ```rust,ignore
//! use ringplus::RingPlusError;
//!
//! match api.get_account(42).await {
//!     Ok(account) => println!("{:?}", account.name),
//!     Err(RingPlusError::RateLimit(e)) => println!("slow down: {e}"),
//!     Err(RingPlusError::Api(e)) if e.status == 404 => println!("no such account"),
//!     Err(e) => println!("failed: {e}"),
//! }
//! ```

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

use crate::auth::AuthError;
use crate::clients::{HttpResponse, TransportError};
use crate::error::ConfigError;

/// The server-side error code RingPlus uses for rate limiting.
pub const RATE_LIMIT_CODE: i64 = 88;

/// Errors detected while binding call arguments to an endpoint.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    /// A keyword is neither a path placeholder nor an allowed parameter.
    #[error("unrecognized argument '{name}' for {endpoint}")]
    Unrecognized {
        /// The endpoint path template.
        endpoint: &'static str,
        /// The offending keyword.
        name: String,
    },

    /// A path placeholder has no value.
    #[error("missing required argument '{name}' for {endpoint}")]
    Missing {
        /// The endpoint path template.
        endpoint: &'static str,
        /// The unfilled placeholder.
        name: String,
    },

    /// A value was supplied twice for the same name.
    #[error("argument '{name}' supplied more than once")]
    Duplicate {
        /// The repeated name.
        name: String,
    },

    /// More positional values than the path has placeholders.
    #[error("too many positional arguments for {endpoint}: expected at most {expected}, got {got}")]
    TooManyPositional {
        /// The endpoint path template.
        endpoint: &'static str,
        /// The number of placeholders.
        expected: usize,
        /// The number of positional values supplied.
        got: usize,
    },
}

/// A non-2xx response from the RingPlus API.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{status} {reason}: {message}")]
pub struct ApiError {
    /// The HTTP status code.
    pub status: u16,
    /// The canonical reason phrase for the status.
    pub reason: String,
    /// The error message reported by the server, or the raw body.
    pub message: String,
    /// The server's own error code, when the body carries one.
    pub api_code: Option<i64>,
    /// Wait requested by the server via `Retry-After`.
    pub retry_after: Option<Duration>,
    /// The `X-Request-Id` header value, if present.
    pub request_id: Option<String>,
}

impl ApiError {
    /// Builds an `ApiError` from a failed response.
    #[must_use]
    pub fn from_response(response: &HttpResponse) -> Self {
        let body = response.json().ok();
        let message = body
            .as_ref()
            .and_then(error_message)
            .unwrap_or_else(|| {
                let raw = response.body.trim();
                if raw.is_empty() {
                    response.reason().to_string()
                } else {
                    raw.to_string()
                }
            });

        Self {
            status: response.code,
            reason: response.reason().to_string(),
            message,
            api_code: body.as_ref().and_then(error_code),
            retry_after: response.retry_after,
            request_id: response.request_id().map(ToString::to_string),
        }
    }
}

/// A response body that does not match the declared payload type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unable to parse {payload} payload: {reason}")]
pub struct ParseError {
    /// The payload type that was expected (e.g. `account`, `ids`).
    pub payload: String,
    /// What was wrong with the body.
    pub reason: String,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(payload: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            reason: reason.into(),
        }
    }
}

/// The single error type returned by every API call.
#[derive(Debug, Error)]
pub enum RingPlusError {
    /// Invalid, unrecognized or missing call arguments.
    #[error(transparent)]
    Argument(#[from] ArgumentError),

    /// Authentication failure.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// No response was received.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server answered with a non-2xx status.
    #[error(transparent)]
    Api(ApiError),

    /// The server reported a rate limit.
    #[error("rate limit exceeded: {0}")]
    RateLimit(ApiError),

    /// The body did not match the declared payload type.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Invalid client configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A follow-up call was made on an entity whose client is gone or that
    /// was never fetched through a client.
    #[error("{model} is not attached to a live client")]
    Detached {
        /// The entity kind.
        model: &'static str,
    },
}

impl RingPlusError {
    /// Classifies a non-2xx response as [`RateLimit`](Self::RateLimit) or
    /// [`Api`](Self::Api).
    #[must_use]
    pub fn from_response(response: &HttpResponse) -> Self {
        let error = ApiError::from_response(response);
        let rate_limited = response.code == 429
            || response.json().ok().is_some_and(|body| is_rate_limit_body(&body));
        if rate_limited {
            Self::RateLimit(error)
        } else {
            Self::Api(error)
        }
    }

    /// Returns `true` for rate-limit errors.
    #[must_use]
    pub const fn is_rate_limit(&self) -> bool {
        matches!(self, Self::RateLimit(_))
    }

    /// Returns the HTTP status for API and rate-limit errors.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api(e) | Self::RateLimit(e) => Some(e.status),
            _ => None,
        }
    }
}

/// Returns `true` if a response body carries the rate-limit signature:
/// `code == 88` at the top level, as the first entry of an `errors` list, or
/// as the first entry of a bare error list.
#[must_use]
pub fn is_rate_limit_body(body: &Value) -> bool {
    error_code(body) == Some(RATE_LIMIT_CODE)
}

fn first_error(body: &Value) -> Option<&Value> {
    match body {
        Value::Array(items) => items.first(),
        Value::Object(map) => match map.get("errors") {
            Some(Value::Array(items)) => items.first(),
            Some(errors @ Value::Object(_)) => Some(errors),
            _ => None,
        },
        _ => None,
    }
}

fn error_code(body: &Value) -> Option<i64> {
    let code_of = |value: &Value| {
        value.get("code").and_then(|code| {
            code.as_i64()
                .or_else(|| code.as_str().and_then(|s| s.parse().ok()))
        })
    };
    body.as_object()
        .and_then(|_| code_of(body))
        .or_else(|| first_error(body).and_then(code_of))
}

fn error_message(body: &Value) -> Option<String> {
    const KEYS: [&str; 3] = ["error_description", "message", "error"];

    let text_of = |value: &Value| {
        KEYS.iter()
            .find_map(|key| value.get(*key).and_then(Value::as_str))
            .map(ToString::to_string)
    };

    if let Some(message) = body.as_object().and_then(|_| text_of(body)) {
        return Some(message);
    }
    if let Some(Value::String(message)) = body.get("errors") {
        return Some(message.clone());
    }
    first_error(body).and_then(|first| match first {
        Value::String(message) => Some(message.clone()),
        other => text_of(other),
    })
}
