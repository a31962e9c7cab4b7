//! HTTP transport layer for RingPlus API communication.
//!
//! # Overview
//!
//! - [`HttpTransport`]: the collaborator trait the binder sends requests through
//! - [`ReqwestTransport`]: the `reqwest`-backed implementation
//! - [`PreparedRequest`]: a fully resolved request (URL, headers, query, form)
//! - [`HttpResponse`]: status, headers and body text of a received response
//! - [`HttpMethod`]: supported HTTP methods (GET, POST, PUT, DELETE)
//! - [`TransportError`]: a request that produced no response
//!
//! Retry, rate-limit handling and response interpretation live in the binder
//! ([`crate::rest::Binder`]); transports only move bytes.

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{TransportError, TransportErrorKind};
pub use http_client::{BoxFuture, HttpTransport, ReqwestTransport, SDK_VERSION};
pub use http_request::{encode_pairs, HttpMethod, PreparedRequest, PreparedRequestBuilder};
pub use http_response::HttpResponse;
